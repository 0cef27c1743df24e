// SPDX-License-Identifier: Apache-2.0

use log::{debug, trace};

const DEFAULT_LOWER_BOUNDARY: u8 = 0x80;
const DEFAULT_UPPER_BOUNDARY: u8 = 0xBF;

/// What a single byte did to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Byte consumed, the sequence in progress needs more bytes.
    Pending,
    /// Byte consumed and a scalar value completed.
    CodePoint(char),
    /// A maximal subpart was rejected.
    ///
    /// When `reprocess` is set the byte was *not* consumed: the engine is idle
    /// again and the same byte has to be fed once more.
    Error { error: Error, reprocess: bool },
}

/// Events delivered by [`Utf8Engine::decode_chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CodePoint(char),
    Error(Error),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrKind,
    byte: Option<u8>,
    position: usize,
    subpart_len: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// 0x80..=0xBF with no sequence in progress.
    UnexpectedContinuation,
    /// 0xC0, 0xC1 or 0xF5..=0xFF.
    InvalidLeadByte,
    /// 0xE0 or 0xF0 followed by a continuation byte that would encode a
    /// shorter form.
    Overlong,
    /// 0xED followed by 0xA0..=0xBF.
    Surrogate,
    /// 0xF4 followed by 0x90..=0xBF.
    OutOfRange,
    /// A non-continuation byte arrived inside a sequence.
    IncompleteSequence,
    /// The stream ended inside a sequence.
    UnfinishedSequence,
    /// Accumulated value is not a scalar value. Unreachable while the
    /// boundary narrowing holds.
    InvalidScalarValue,
}

impl Error {
    pub fn new<T>(
        kind: ErrKind,
        byte: Option<u8>,
        position: usize,
        subpart_len: u8,
    ) -> Result<T, Self> {
        Err(Self::at(kind, byte, position, subpart_len))
    }

    fn at(kind: ErrKind, byte: Option<u8>, position: usize, subpart_len: u8) -> Self {
        Self {
            kind,
            byte,
            position,
            subpart_len,
        }
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The byte that triggered the error, `None` when the stream ended.
    ///
    /// For the in-sequence kinds this byte is not part of the rejected
    /// subpart.
    pub fn byte(&self) -> Option<u8> {
        self.byte
    }

    /// Stream offset of the first byte of the rejected subpart.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes in the rejected subpart (1 to 3).
    pub fn subpart_len(&self) -> u8 {
        self.subpart_len
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.byte {
            Some(byte) => write!(
                f,
                "{:?}({:#04x}) at {}+{}",
                self.kind, byte, self.position, self.subpart_len
            ),
            None => write!(
                f,
                "{:?}(eof) at {}+{}",
                self.kind, self.position, self.subpart_len
            ),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            ErrKind::UnexpectedContinuation => "unexpected continuation byte",
            ErrKind::InvalidLeadByte => "invalid lead byte",
            ErrKind::Overlong => "overlong encoding",
            ErrKind::Surrogate => "encoded surrogate",
            ErrKind::OutOfRange => "code point above U+10FFFF",
            ErrKind::IncompleteSequence => "incomplete sequence",
            ErrKind::UnfinishedSequence => "stream ended inside a sequence",
            ErrKind::InvalidScalarValue => "invalid scalar value",
        };
        write!(
            f,
            "The encoded data was not valid UTF-8: {what} at byte {}",
            self.position
        )
    }
}

impl core::error::Error for Error {}

/// The UTF-8 decoder state machine from the WHATWG Encoding Standard.
///
/// Bytes go in one at a time through [`feed`](Self::feed) (or in bulk through
/// [`decode_chunk`](Self::decode_chunk)); scalar values and errors come out.
/// The engine knows nothing about replacement characters, byte order marks
/// or fatal mode; those are policies of the caller.
#[derive(Debug, Clone)]
pub struct Utf8Engine {
    code_point: u32,
    bytes_needed: u8,
    bytes_seen: u8,
    lower_boundary: u8,
    upper_boundary: u8,
    /// Offset of the lead byte of the sequence in progress
    sequence_start: usize,
    total_consumed: usize,
}

impl Default for Utf8Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Engine {
    pub fn new() -> Self {
        Utf8Engine {
            code_point: 0,
            bytes_needed: 0,
            bytes_seen: 0,
            lower_boundary: DEFAULT_LOWER_BOUNDARY,
            upper_boundary: DEFAULT_UPPER_BOUNDARY,
            sequence_start: 0,
            total_consumed: 0,
        }
    }

    /// True while a multi-byte sequence is waiting for continuation bytes.
    pub fn is_pending(&self) -> bool {
        self.bytes_needed != 0
    }

    pub fn bytes_needed(&self) -> u8 {
        self.bytes_needed
    }

    pub fn bytes_seen(&self) -> u8 {
        self.bytes_seen
    }

    /// Number of buffered bytes of the sequence in progress, lead byte included.
    pub fn pending_len(&self) -> u8 {
        if self.bytes_needed == 0 {
            0
        } else {
            self.bytes_seen + 1
        }
    }

    /// Inclusive range accepted for the next continuation byte.
    pub fn boundaries(&self) -> (u8, u8) {
        (self.lower_boundary, self.upper_boundary)
    }

    /// Bytes consumed since the engine was created.
    pub fn total_consumed(&self) -> usize {
        self.total_consumed
    }

    /// Drops any sequence in progress. The consumed-bytes counter is kept.
    pub fn reset(&mut self) {
        self.code_point = 0;
        self.bytes_needed = 0;
        self.bytes_seen = 0;
        self.lower_boundary = DEFAULT_LOWER_BOUNDARY;
        self.upper_boundary = DEFAULT_UPPER_BOUNDARY;
    }

    /// Accounts for `len` bytes the caller decoded without the state machine.
    ///
    /// Only valid while idle: returns `false` and does nothing if a sequence
    /// is in progress.
    pub fn skip_valid(&mut self, len: usize) -> bool {
        if self.is_pending() {
            return false;
        }
        self.total_consumed = self.total_consumed.saturating_add(len);
        true
    }

    pub fn feed(&mut self, byte: u8) -> DecodeOutcome {
        trace!(
            "Pos: {}, Byte: {:#04x}, Needed: {}, Seen: {}, Bounds: {:#04x}..={:#04x}",
            self.total_consumed,
            byte,
            self.bytes_needed,
            self.bytes_seen,
            self.lower_boundary,
            self.upper_boundary
        );
        if self.bytes_needed == 0 {
            self.start_sequence(byte)
        } else {
            self.continue_sequence(byte)
        }
    }

    /// End of stream. Reports the unfinished sequence, if any, as a single
    /// error and always leaves the engine idle.
    pub fn finish(&mut self) -> Option<Error> {
        let unfinished = self.is_pending().then(|| {
            Error::at(
                ErrKind::UnfinishedSequence,
                None,
                self.sequence_start,
                self.pending_len(),
            )
        });
        debug!(
            "--finished-- {} consumed, unfinished: {:?}",
            self.total_consumed, unfinished
        );
        self.reset();
        unfinished
    }

    /// Decodes `data`, reporting every code point and error to `callback`
    /// together with the index of the byte that produced it.
    ///
    /// Bytes of a trailing incomplete sequence stay buffered. A callback error
    /// stops decoding immediately and is returned as is.
    pub fn decode_chunk<F, E>(&mut self, data: &[u8], callback: &mut F) -> Result<usize, E>
    where
        F: FnMut(Event, usize) -> Result<(), E> + ?Sized,
    {
        let mut pos = 0;
        while let Some(&byte) = data.get(pos) {
            match self.feed(byte) {
                DecodeOutcome::Pending => pos += 1,
                DecodeOutcome::CodePoint(ch) => {
                    callback(Event::CodePoint(ch), pos)?;
                    pos += 1;
                }
                DecodeOutcome::Error { error, reprocess } => {
                    callback(Event::Error(error), pos)?;
                    if !reprocess {
                        pos += 1;
                    }
                }
            }
        }
        Ok(pos)
    }

    /// [`decode_chunk`](Self::decode_chunk) followed by [`finish`](Self::finish).
    pub fn decode_full<F, E>(&mut self, data: &[u8], callback: &mut F) -> Result<usize, E>
    where
        F: FnMut(Event, usize) -> Result<(), E> + ?Sized,
    {
        let consumed = self.decode_chunk(data, callback)?;
        if let Some(error) = self.finish() {
            callback(Event::Error(error), consumed)?;
        }
        Ok(consumed)
    }

    fn start_sequence(&mut self, byte: u8) -> DecodeOutcome {
        let position = self.total_consumed;
        self.total_consumed = self.total_consumed.saturating_add(1);
        match byte {
            0x00..=0x7F => DecodeOutcome::CodePoint(char::from(byte)),
            0xC2..=0xDF => self.begin(position, 1, byte & 0x1F),
            0xE0..=0xEF => {
                match byte {
                    0xE0 => self.lower_boundary = 0xA0,
                    0xED => self.upper_boundary = 0x9F,
                    _ => {}
                }
                self.begin(position, 2, byte & 0x0F)
            }
            0xF0..=0xF4 => {
                match byte {
                    0xF0 => self.lower_boundary = 0x90,
                    0xF4 => self.upper_boundary = 0x8F,
                    _ => {}
                }
                self.begin(position, 3, byte & 0x07)
            }
            0x80..=0xBF => {
                Self::rejected(ErrKind::UnexpectedContinuation, byte, position, 1, false)
            }
            0xC0 | 0xC1 | 0xF5..=0xFF => {
                Self::rejected(ErrKind::InvalidLeadByte, byte, position, 1, false)
            }
        }
    }

    fn begin(&mut self, position: usize, bytes_needed: u8, bits: u8) -> DecodeOutcome {
        self.sequence_start = position;
        self.bytes_needed = bytes_needed;
        self.code_point = u32::from(bits);
        DecodeOutcome::Pending
    }

    fn continue_sequence(&mut self, byte: u8) -> DecodeOutcome {
        if !(self.lower_boundary..=self.upper_boundary).contains(&byte) {
            let kind = self.classify_rejection(byte);
            let (position, subpart_len) = (self.sequence_start, self.pending_len());
            self.reset();
            return Self::rejected(kind, byte, position, subpart_len, true);
        }

        self.total_consumed = self.total_consumed.saturating_add(1);
        self.lower_boundary = DEFAULT_LOWER_BOUNDARY;
        self.upper_boundary = DEFAULT_UPPER_BOUNDARY;
        self.code_point = (self.code_point << 6) | u32::from(byte & 0x3F);
        self.bytes_seen += 1;

        if self.bytes_seen != self.bytes_needed {
            return DecodeOutcome::Pending;
        }

        let (code_point, position, subpart_len) =
            (self.code_point, self.sequence_start, self.bytes_needed + 1);
        self.reset();
        match char::from_u32(code_point) {
            Some(ch) => DecodeOutcome::CodePoint(ch),
            None => Self::rejected(
                ErrKind::InvalidScalarValue,
                byte,
                position,
                subpart_len,
                false,
            ),
        }
    }

    // Only called for a byte outside the current boundaries. A continuation
    // byte can only be out of bounds on the first continuation after
    // E0/ED/F0/F4, the one place where the bounds are narrowed.
    fn classify_rejection(&self, byte: u8) -> ErrKind {
        if !(DEFAULT_LOWER_BOUNDARY..=DEFAULT_UPPER_BOUNDARY).contains(&byte) {
            ErrKind::IncompleteSequence
        } else if byte < self.lower_boundary {
            ErrKind::Overlong
        } else if self.bytes_needed == 2 {
            ErrKind::Surrogate
        } else {
            ErrKind::OutOfRange
        }
    }

    fn rejected(
        kind: ErrKind,
        byte: u8,
        position: usize,
        subpart_len: u8,
        reprocess: bool,
    ) -> DecodeOutcome {
        let error = Error::at(kind, Some(byte), position, subpart_len);
        debug!("rejected: {:?}, reprocess: {}", error, reprocess);
        DecodeOutcome::Error { error, reprocess }
    }
}
