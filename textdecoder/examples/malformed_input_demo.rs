// Replacement vs. fatal handling of malformed UTF-8

use textdecoder::{DecodeError, DecodeOptions, DecoderConfig, StreamingDecoder};

fn main() {
    let samples: &[(&str, &[u8])] = &[
        ("lone continuation", b"a\x80b"),
        ("overlong", b"\xE0\x80\xAF"),
        ("surrogate", b"\xED\xA0\x80"),
        ("above U+10FFFF", b"\xF4\x90\x80\x80"),
        ("truncated", b"abc\xF0\x9F\x92"),
        ("invalid lead", b"\xC0\xFF"),
    ];

    let mut lenient = StreamingDecoder::default();
    let mut strict = StreamingDecoder::utf8(DecoderConfig::new().with_fatal(true));

    for (name, bytes) in samples {
        println!("{} {:02X?}", name, bytes);
        match lenient.decode(bytes, DecodeOptions::FINAL) {
            Ok(text) => println!("  replacement: {:?}", text),
            Err(e) => println!("  replacement: unexpected error {}", e),
        }
        match strict.decode(bytes, DecodeOptions::FINAL) {
            Ok(text) => println!("  fatal:       {:?}", text),
            Err(DecodeError::Malformed(e)) => println!("  fatal:       {:?}", e),
            Err(e) => println!("  fatal:       {}", e),
        }
    }
}
