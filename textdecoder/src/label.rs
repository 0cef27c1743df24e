// SPDX-License-Identifier: Apache-2.0

use alloc::string::ToString;

use log::debug;

use crate::decode_error::ConstructionError;

/// Labels of the UTF-8 encoding.
const UTF8_LABELS: &[&str] = &[
    "unicode-1-1-utf-8",
    "unicode11utf8",
    "unicode20utf8",
    "utf-8",
    "utf8",
    "x-unicode20utf8",
];

/// Labels mapped to the "replacement" encoding. Decoding these would only
/// ever produce a single U+FFFD, so they are refused up front.
const REPLACEMENT_LABELS: &[&str] = &[
    "csiso2022kr",
    "hz-gb-2312",
    "iso-2022-cn",
    "iso-2022-cn-ext",
    "iso-2022-kr",
    "replacement",
];

/// Other recognised labels and the encoding each one names.
const UNSUPPORTED_LABELS: &[(&str, &str)] = &[
    ("utf-16", "utf-16le"),
    ("utf-16le", "utf-16le"),
    ("unicodefffe", "utf-16be"),
    ("utf-16be", "utf-16be"),
    ("ibm866", "ibm866"),
    ("866", "ibm866"),
    ("cp866", "ibm866"),
    ("iso-8859-2", "iso-8859-2"),
    ("latin2", "iso-8859-2"),
    ("l2", "iso-8859-2"),
    ("iso-8859-5", "iso-8859-5"),
    ("cyrillic", "iso-8859-5"),
    ("iso-8859-7", "iso-8859-7"),
    ("greek", "iso-8859-7"),
    ("iso-8859-8", "iso-8859-8"),
    ("hebrew", "iso-8859-8"),
    ("iso-8859-15", "iso-8859-15"),
    ("latin9", "iso-8859-15"),
    ("l9", "iso-8859-15"),
    ("koi8-r", "koi8-r"),
    ("koi8", "koi8-r"),
    ("koi8-u", "koi8-u"),
    ("macintosh", "macintosh"),
    ("mac", "macintosh"),
    ("windows-874", "windows-874"),
    ("windows-1250", "windows-1250"),
    ("windows-1251", "windows-1251"),
    ("windows-1252", "windows-1252"),
    ("ascii", "windows-1252"),
    ("us-ascii", "windows-1252"),
    ("iso-8859-1", "windows-1252"),
    ("latin1", "windows-1252"),
    ("l1", "windows-1252"),
    ("cp1252", "windows-1252"),
    ("windows-1253", "windows-1253"),
    ("windows-1254", "windows-1254"),
    ("windows-1255", "windows-1255"),
    ("windows-1256", "windows-1256"),
    ("windows-1257", "windows-1257"),
    ("windows-1258", "windows-1258"),
    ("gbk", "gbk"),
    ("gb2312", "gbk"),
    ("gb18030", "gb18030"),
    ("big5", "big5"),
    ("big5-hkscs", "big5"),
    ("euc-jp", "euc-jp"),
    ("iso-2022-jp", "iso-2022-jp"),
    ("shift_jis", "shift_jis"),
    ("sjis", "shift_jis"),
    ("euc-kr", "euc-kr"),
    ("ks_c_5601-1987", "euc-kr"),
    ("x-user-defined", "x-user-defined"),
];

/// The encodings a decoder can be constructed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
}

impl Encoding {
    /// Resolves an encoding label.
    ///
    /// Leading and trailing ASCII whitespace is ignored and the comparison is
    /// ASCII case-insensitive, so `" UTF8\n"` names UTF-8.
    pub fn for_label(label: &str) -> Result<Self, ConstructionError> {
        let trimmed = label.trim_matches(|c: char| c.is_ascii_whitespace());
        let matches = |known: &&str| known.eq_ignore_ascii_case(trimmed);

        if UTF8_LABELS.iter().any(matches) {
            debug!("label {:?} resolved to utf-8", label);
            return Ok(Encoding::Utf8);
        }
        if REPLACEMENT_LABELS.iter().any(matches) {
            return Err(ConstructionError::ReplacementEncoding(trimmed.to_string()));
        }
        match UNSUPPORTED_LABELS.iter().find(|(known, _)| matches(known)) {
            Some(&(_, name)) => Err(ConstructionError::UnsupportedEncoding(name)),
            None => Err(ConstructionError::UnknownLabel(label.to_string())),
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_every_utf8_label() {
        for label in UTF8_LABELS {
            assert_eq!(Encoding::for_label(label), Ok(Encoding::Utf8));
        }
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(Encoding::for_label("UTF-8"), Ok(Encoding::Utf8));
        assert_eq!(Encoding::for_label(" \t\nUtF8\x0C\r "), Ok(Encoding::Utf8));
        assert_eq!(
            Encoding::for_label("Unicode-1-1-UTF-8"),
            Ok(Encoding::Utf8)
        );
    }

    #[test]
    fn test_inner_whitespace_not_trimmed() {
        assert_eq!(
            Encoding::for_label("utf -8"),
            Err(ConstructionError::UnknownLabel("utf -8".into()))
        );
    }

    #[test]
    fn test_non_ascii_whitespace_not_trimmed() {
        // U+00A0 is whitespace to Unicode but not to the label rules
        assert!(matches!(
            Encoding::for_label("\u{A0}utf-8"),
            Err(ConstructionError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_replacement_labels() {
        for label in REPLACEMENT_LABELS {
            assert_eq!(
                Encoding::for_label(label),
                Err(ConstructionError::ReplacementEncoding((*label).into()))
            );
        }
        assert_eq!(
            Encoding::for_label("  ISO-2022-KR "),
            Err(ConstructionError::ReplacementEncoding("ISO-2022-KR".into()))
        );
    }

    #[test]
    fn test_unsupported_labels() {
        assert_eq!(
            Encoding::for_label("UTF-16"),
            Err(ConstructionError::UnsupportedEncoding("utf-16le"))
        );
        assert_eq!(
            Encoding::for_label("latin1"),
            Err(ConstructionError::UnsupportedEncoding("windows-1252"))
        );
        assert_eq!(
            Encoding::for_label("Shift_JIS"),
            Err(ConstructionError::UnsupportedEncoding("shift_jis"))
        );
    }

    #[test]
    fn test_unknown_labels() {
        for label in ["", "   ", "utf-7", "utf-88", "klingon"] {
            assert_eq!(
                Encoding::for_label(label),
                Err(ConstructionError::UnknownLabel(label.into()))
            );
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(Encoding::Utf8.name(), "utf-8");
        assert_eq!(Encoding::default(), Encoding::Utf8);
    }
}
