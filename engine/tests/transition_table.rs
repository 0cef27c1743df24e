// SPDX-License-Identifier: Apache-2.0

//! Exhaustive checks of the lead-byte classification and of the range
//! accepted for the first continuation byte after every lead byte.

use utf8engine::{DecodeOutcome, ErrKind, Utf8Engine};

/// Expected continuation bytes for the first byte after `lead`, as listed in
/// the WHATWG UTF-8 decoder.
fn first_continuation_range(lead: u8) -> Option<(u8, u8)> {
    match lead {
        0xC2..=0xDF => Some((0x80, 0xBF)),
        0xE0 => Some((0xA0, 0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((0x80, 0xBF)),
        0xED => Some((0x80, 0x9F)),
        0xF0 => Some((0x90, 0xBF)),
        0xF1..=0xF3 => Some((0x80, 0xBF)),
        0xF4 => Some((0x80, 0x8F)),
        _ => None,
    }
}

#[test]
fn test_every_lead_byte() {
    for byte in 0u8..=0xFF {
        let mut engine = Utf8Engine::new();
        let outcome = engine.feed(byte);
        match byte {
            0x00..=0x7F => {
                assert_eq!(outcome, DecodeOutcome::CodePoint(char::from(byte)));
                assert!(!engine.is_pending());
            }
            0x80..=0xBF => match outcome {
                DecodeOutcome::Error { error, reprocess } => {
                    assert!(!reprocess, "byte {:#04x}", byte);
                    assert_eq!(error.kind(), ErrKind::UnexpectedContinuation);
                }
                other => panic!("byte {:#04x}: expected error, got {:?}", byte, other),
            },
            0xC0 | 0xC1 | 0xF5..=0xFF => match outcome {
                DecodeOutcome::Error { error, reprocess } => {
                    assert!(!reprocess, "byte {:#04x}", byte);
                    assert_eq!(error.kind(), ErrKind::InvalidLeadByte);
                }
                other => panic!("byte {:#04x}: expected error, got {:?}", byte, other),
            },
            _ => {
                assert_eq!(outcome, DecodeOutcome::Pending, "byte {:#04x}", byte);
                let expected_needed = match byte {
                    0xC2..=0xDF => 1,
                    0xE0..=0xEF => 2,
                    _ => 3,
                };
                assert_eq!(engine.bytes_needed(), expected_needed);
                assert_eq!(engine.bytes_seen(), 0);
                assert_eq!(Some(engine.boundaries()), first_continuation_range(byte));
            }
        }
    }
}

#[test]
fn test_every_lead_and_second_byte_pair() {
    for lead in 0xC2u8..=0xF4 {
        let (lower, upper) = first_continuation_range(lead).unwrap();
        for second in 0u8..=0xFF {
            let mut engine = Utf8Engine::new();
            assert_eq!(engine.feed(lead), DecodeOutcome::Pending);
            let outcome = engine.feed(second);
            let accepted = (lower..=upper).contains(&second);

            match (accepted, outcome) {
                (true, DecodeOutcome::CodePoint(ch)) => {
                    assert_eq!(lead & 0xE0, 0xC0, "only 2-byte leads complete here");
                    let expected = (u32::from(lead & 0x1F) << 6) | u32::from(second & 0x3F);
                    assert_eq!(u32::from(ch), expected);
                }
                (true, DecodeOutcome::Pending) => {
                    assert!(lead >= 0xE0);
                    assert_eq!(engine.bytes_seen(), 1);
                    assert_eq!(engine.boundaries(), (0x80, 0xBF));
                }
                (false, DecodeOutcome::Error { error, reprocess }) => {
                    assert!(reprocess, "{:#04x} {:#04x}", lead, second);
                    assert_eq!(error.position(), 0);
                    assert_eq!(error.subpart_len(), 1);
                    assert_eq!(error.byte(), Some(second));
                    assert!(!engine.is_pending());
                    let expected_kind = if !(0x80..=0xBF).contains(&second) {
                        ErrKind::IncompleteSequence
                    } else if lead == 0xE0 || lead == 0xF0 {
                        ErrKind::Overlong
                    } else if lead == 0xED {
                        ErrKind::Surrogate
                    } else {
                        ErrKind::OutOfRange
                    };
                    assert_eq!(error.kind(), expected_kind, "{:#04x} {:#04x}", lead, second);
                }
                (accepted, outcome) => panic!(
                    "{:#04x} {:#04x}: accepted={} but got {:?}",
                    lead, second, accepted, outcome
                ),
            }
        }
    }
}

#[test]
fn test_sampled_scalar_values() {
    let mut engine = Utf8Engine::new();
    let mut buf = [0u8; 4];
    for ch in (0u32..=0x10FFFF).filter_map(char::from_u32).step_by(97) {
        let mut decoded = None;
        for &byte in ch.encode_utf8(&mut buf).as_bytes() {
            match engine.feed(byte) {
                DecodeOutcome::Pending => {}
                DecodeOutcome::CodePoint(c) => decoded = Some(c),
                DecodeOutcome::Error { error, .. } => panic!("{:?} for {:?}", error, ch),
            }
        }
        assert_eq!(decoded, Some(ch));
        assert!(!engine.is_pending());
    }
}
