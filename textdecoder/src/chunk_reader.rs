// SPDX-License-Identifier: Apache-2.0

//! Byte sources for decoding streams that do not fit in one slice.
//!
//! [`DecodeStream`] pulls chunks from any [`Reader`] and runs them through a
//! [`StreamingDecoder`], flushing it when the reader is exhausted.
//! [`ChunkReader`] serves an in-memory slice in fixed-size pieces, which is
//! handy for exercising chunk boundaries; [`IoReader`] adapts
//! [`std::io::Read`] when the `std` feature is on.
//!
//! ```rust
//! use textdecoder::{ChunkReader, DecodeStream, StreamingDecoder};
//!
//! let bytes = "naïve café".as_bytes();
//! let mut buffer = [0u8; 16];
//! let stream = DecodeStream::new(ChunkReader::new(bytes, 3), StreamingDecoder::default(), &mut buffer);
//! assert_eq!(stream.read_to_string().unwrap(), "naïve café");
//! ```

use alloc::string::String;

use log::debug;

use crate::decode_error::DecodeError;
use crate::streaming_decoder::StreamingDecoder;

/// A source of bytes.
pub trait Reader {
    type Error;

    /// Reads up to `buf.len()` bytes into `buf` and returns how many were read.
    ///
    /// Returning 0 means end of data; a reader must not produce more bytes
    /// after that.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// A [`Reader`] over a byte slice that hands out at most `chunk_size` bytes
/// per `read()`.
#[derive(Debug)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// `chunk_size` is clamped to at least 1.
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Reads as much as the destination buffer holds on every call.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }
}

impl Reader for ChunkReader<'_> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or_default();
        let to_copy = remaining.len().min(buf.len()).min(self.chunk_size);
        match (buf.get_mut(..to_copy), remaining.get(..to_copy)) {
            (Some(dest), Some(src)) => dest.copy_from_slice(src),
            _ => return Ok(0),
        }
        self.pos = self.pos.saturating_add(to_copy);
        Ok(to_copy)
    }
}

/// A [`Reader`] over any [`std::io::Read`]. Interrupted reads are retried.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

/// Decodes everything a [`Reader`] produces, one buffer-full at a time.
///
/// Each item is the text decoded from one read; the last item holds whatever
/// the end-of-stream flush produced. Iteration stops after the first error.
pub struct DecodeStream<'b, R: Reader> {
    reader: R,
    decoder: StreamingDecoder,
    buffer: &'b mut [u8],
    finished: bool,
}

impl<'b, R: Reader> DecodeStream<'b, R> {
    /// `buffer` bounds the size of each read. An empty buffer ends the
    /// stream on the first read.
    pub fn new(reader: R, decoder: StreamingDecoder, buffer: &'b mut [u8]) -> Self {
        Self {
            reader,
            decoder,
            buffer,
            finished: false,
        }
    }

    /// Reads and decodes the next chunk. `None` once the stream is done.
    pub fn next_chunk(&mut self) -> Option<Result<String, DecodeError>> {
        if self.finished {
            return None;
        }
        let result = match self.reader.read(self.buffer) {
            Ok(0) => {
                debug!("end of data, flushing");
                self.finished = true;
                self.decoder.finish()
            }
            Ok(n) => match self.buffer.get(..n) {
                Some(chunk) => self.decoder.decode_stream(chunk),
                None => Err(DecodeError::ReaderError),
            },
            Err(_) => Err(DecodeError::ReaderError),
        };
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }

    /// Drains the stream into one string.
    pub fn read_to_string(mut self) -> Result<String, DecodeError> {
        let mut text = String::new();
        while let Some(chunk) = self.next_chunk() {
            text.push_str(&chunk?);
        }
        Ok(text)
    }

    pub fn decoder(&self) -> &StreamingDecoder {
        &self.decoder
    }

    pub fn into_decoder(self) -> StreamingDecoder {
        self.decoder
    }
}

impl<R: Reader> Iterator for DecodeStream<'_, R> {
    type Item = Result<String, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk()
    }
}
