// SPDX-License-Identifier: Apache-2.0

/// Construction-time settings of a [`StreamingDecoder`](crate::StreamingDecoder).
///
/// ```rust
/// use textdecoder::DecoderConfig;
///
/// let config = DecoderConfig::new().with_fatal(true);
/// assert!(config.fatal);
/// assert!(!config.ignore_bom);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Fail on malformed input instead of substituting U+FFFD.
    pub fatal: bool,
    /// Keep a leading U+FEFF in the output.
    pub ignore_bom: bool,
}

impl DecoderConfig {
    pub const fn new() -> Self {
        Self {
            fatal: false,
            ignore_bom: false,
        }
    }

    pub const fn with_fatal(self, fatal: bool) -> Self {
        Self { fatal, ..self }
    }

    pub const fn with_ignore_bom(self, ignore_bom: bool) -> Self {
        Self { ignore_bom, ..self }
    }
}

/// Per-call settings of [`StreamingDecoder::decode`](crate::StreamingDecoder::decode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// More input follows: keep an incomplete trailing sequence buffered
    /// instead of flushing it as an error.
    pub stream: bool,
}

impl DecodeOptions {
    pub const STREAM: Self = Self { stream: true };
    pub const FINAL: Self = Self { stream: false };
}
