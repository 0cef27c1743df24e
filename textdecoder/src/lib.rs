// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! A streaming UTF-8 text decoder following the WHATWG Encoding Standard.
//!
//! [`StreamingDecoder`] turns arbitrarily chunked bytes into text: sequences
//! split across chunks are buffered, malformed input becomes U+FFFD (or an
//! error in fatal mode), and a leading byte order mark is stripped unless
//! asked otherwise.
//!
//! ```rust
//! use textdecoder::{DecodeOptions, DecoderConfig, StreamingDecoder};
//!
//! let mut decoder = StreamingDecoder::new("utf-8", DecoderConfig::default()).unwrap();
//! let mut text = decoder.decode(&[b'c', b'a', b'f', 0xC3], DecodeOptions::STREAM).unwrap();
//! text += &decoder.decode(&[0xA9], DecodeOptions::FINAL).unwrap();
//! assert_eq!(text, "café");
//! ```

extern crate alloc;

mod chunk_reader;
#[cfg(feature = "std")]
pub use chunk_reader::IoReader;
pub use chunk_reader::{ChunkReader, DecodeStream, Reader};

mod decode_error;
pub use decode_error::{ConstructionError, DecodeError};

mod label;
pub use label::Encoding;

mod options;
pub use options::{DecodeOptions, DecoderConfig};

mod streaming_decoder;
pub use streaming_decoder::StreamingDecoder;

pub use utf8engine::{ErrKind, Error as SequenceError};

/// Substituted for every malformed subpart outside fatal mode.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// U+FEFF, stripped when it is the first code point of a stream.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
