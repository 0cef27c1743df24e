// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use log::debug;
use utf8engine::{Event, Utf8Engine};

use crate::decode_error::{ConstructionError, DecodeError};
use crate::label::Encoding;
use crate::options::{DecodeOptions, DecoderConfig};
use crate::{SequenceError, BYTE_ORDER_MARK, REPLACEMENT_CHARACTER};

/// A UTF-8 decoder for one logical text stream.
///
/// Feed it the stream chunk by chunk with [`DecodeOptions::STREAM`] and pass
/// [`DecodeOptions::FINAL`] with the last chunk (or call [`finish`](Self::finish)).
/// A multi-byte sequence split between chunks is held back until the rest of
/// it arrives.
///
/// ```rust
/// use textdecoder::{DecodeOptions, StreamingDecoder};
///
/// let mut decoder = StreamingDecoder::default();
/// assert_eq!(decoder.decode(&[0xF0, 0x9F], DecodeOptions::STREAM).unwrap(), "");
/// assert_eq!(decoder.decode(&[0x92, 0xA9], DecodeOptions::STREAM).unwrap(), "💩");
/// // a truncated sequence at the end becomes one U+FFFD
/// assert_eq!(decoder.decode(&[0xE2, 0x82], DecodeOptions::FINAL).unwrap(), "\u{FFFD}");
/// ```
#[derive(Debug, Clone)]
pub struct StreamingDecoder {
    encoding: Encoding,
    config: DecoderConfig,
    engine: Utf8Engine,
    /// Set once the first code point of the stream has been looked at.
    bom_checked: bool,
}

impl Default for StreamingDecoder {
    fn default() -> Self {
        Self::utf8(DecoderConfig::default())
    }
}

/// Output side of one `decode` call: applies the byte order mark and
/// replacement policies on the way into the caller's buffer.
struct TextSink<'a> {
    output: &'a mut String,
    bom_checked: &'a mut bool,
    config: DecoderConfig,
}

impl TextSink<'_> {
    fn push(&mut self, ch: char) {
        if !*self.bom_checked {
            *self.bom_checked = true;
            if ch == BYTE_ORDER_MARK && !self.config.ignore_bom {
                debug!("stripped byte order mark");
                return;
            }
        }
        self.output.push(ch);
    }

    fn push_str(&mut self, mut text: &str) {
        if text.is_empty() {
            return;
        }
        if !*self.bom_checked {
            *self.bom_checked = true;
            if !self.config.ignore_bom {
                if let Some(rest) = text.strip_prefix(BYTE_ORDER_MARK) {
                    debug!("stripped byte order mark");
                    text = rest;
                }
            }
        }
        self.output.push_str(text);
    }

    fn error(&mut self, error: SequenceError) -> Result<(), DecodeError> {
        if self.config.fatal {
            debug!("fatal: {:?}", error);
            return Err(DecodeError::Malformed(error));
        }
        debug!("replacing {:?} with U+FFFD", error);
        self.push(REPLACEMENT_CHARACTER);
        Ok(())
    }
}

impl StreamingDecoder {
    /// Creates a decoder for the encoding named by `label`.
    pub fn new(label: &str, config: DecoderConfig) -> Result<Self, ConstructionError> {
        let encoding = Encoding::for_label(label)?;
        Ok(Self::with_encoding(encoding, config))
    }

    pub fn utf8(config: DecoderConfig) -> Self {
        Self::with_encoding(Encoding::Utf8, config)
    }

    fn with_encoding(encoding: Encoding, config: DecoderConfig) -> Self {
        debug!(
            "new decoder: {}, fatal: {}, ignore_bom: {}",
            encoding.name(),
            config.fatal,
            config.ignore_bom
        );
        StreamingDecoder {
            encoding,
            config,
            engine: Utf8Engine::new(),
            bom_checked: false,
        }
    }

    /// Canonical name of the encoding, always `"utf-8"`.
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn fatal(&self) -> bool {
        self.config.fatal
    }

    pub fn ignore_bom(&self) -> bool {
        self.config.ignore_bom
    }

    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// True while bytes of an incomplete sequence are buffered.
    pub fn has_pending(&self) -> bool {
        self.engine.is_pending()
    }

    /// Decodes the next chunk of the stream.
    ///
    /// In fatal mode the first malformed sequence fails the whole call: no
    /// text is returned for this chunk, the remaining bytes of it are dropped
    /// and the decoder is ready for the next chunk.
    pub fn decode(&mut self, input: &[u8], options: DecodeOptions) -> Result<String, DecodeError> {
        let mut output = String::new();
        self.decode_to_string(input, options, &mut output)?;
        Ok(output)
    }

    /// Like [`decode`](Self::decode) but appends to `output`, returning the
    /// number of bytes appended. On error `output` is left as it was.
    pub fn decode_to_string(
        &mut self,
        input: &[u8],
        options: DecodeOptions,
        output: &mut String,
    ) -> Result<usize, DecodeError> {
        let start = output.len();
        let bom_checked = self.bom_checked;
        match self.decode_into(input, options, output) {
            Ok(()) => Ok(output.len() - start),
            Err(e) => {
                output.truncate(start);
                self.bom_checked = bom_checked;
                Err(e)
            }
        }
    }

    /// Shorthand for `decode(input, DecodeOptions::STREAM)`.
    pub fn decode_stream(&mut self, input: &[u8]) -> Result<String, DecodeError> {
        self.decode(input, DecodeOptions::STREAM)
    }

    /// Ends the stream, flushing a buffered incomplete sequence.
    pub fn finish(&mut self) -> Result<String, DecodeError> {
        self.decode(&[], DecodeOptions::FINAL)
    }

    fn decode_into(
        &mut self,
        input: &[u8],
        options: DecodeOptions,
        output: &mut String,
    ) -> Result<(), DecodeError> {
        output.reserve(input.len());
        let mut sink = TextSink {
            output,
            bom_checked: &mut self.bom_checked,
            config: self.config,
        };

        let mut rest = input;
        if !self.engine.is_pending() {
            // Longest valid prefix goes straight through.
            let valid = rest.utf8_chunks().next().map_or("", |chunk| chunk.valid());
            sink.push_str(valid);
            self.engine.skip_valid(valid.len());
            rest = rest.get(valid.len()..).unwrap_or_default();
        }

        self.engine
            .decode_chunk(rest, &mut |event, _pos| match event {
                Event::CodePoint(ch) => {
                    sink.push(ch);
                    Ok(())
                }
                Event::Error(error) => sink.error(error),
            })?;

        if !options.stream {
            if let Some(error) = self.engine.finish() {
                sink.error(error)?;
            }
        }
        Ok(())
    }
}
