// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use utf8engine::Error as SequenceError;

/// Errors raised while constructing a decoder from an encoding label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The label does not name any encoding.
    UnknownLabel(String),
    /// The label names one of the legacy encodings (ISO-2022-KR, HZ-GB-2312,
    /// ...) that are mapped to the "replacement" encoding and never decoded.
    ReplacementEncoding(String),
    /// The label names a known encoding other than UTF-8.
    UnsupportedEncoding(&'static str),
}

/// Errors that can occur while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed input in fatal mode.
    Malformed(SequenceError),
    /// Error from the underlying reader (I/O error, not end-of-stream)
    ReaderError,
}

impl From<SequenceError> for DecodeError {
    fn from(err: SequenceError) -> Self {
        DecodeError::Malformed(err)
    }
}

impl core::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConstructionError::UnknownLabel(label) => {
                write!(f, "The encoding label provided ('{label}') is invalid")
            }
            ConstructionError::ReplacementEncoding(label) => write!(
                f,
                "The encoding label '{label}' maps to the replacement encoding"
            ),
            ConstructionError::UnsupportedEncoding(name) => {
                write!(f, "Unsupported encoding: {name} (only UTF-8 is supported)")
            }
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Malformed(e) => write!(f, "{e}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl core::error::Error for ConstructionError {}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DecodeError::Malformed(e) => Some(e),
            DecodeError::ReaderError => None,
        }
    }
}
