// Decoding text that arrives in small, arbitrarily split packets

use textdecoder::{ChunkReader, DecodeError, DecodeStream, StreamingDecoder};

fn main() -> Result<(), DecodeError> {
    println!("StreamingDecoder demo with ChunkReader");
    println!("======================================");

    let text = "\u{FEFF}Grüße, 世界! 🦀 ok";
    let bytes = text.as_bytes();
    println!("Input: {} bytes, starts with a byte order mark", bytes.len());
    println!();

    // 3-byte reads split most of the multi-byte characters
    let reader = ChunkReader::new(bytes, 3);
    let mut buffer = [0u8; 16];
    let stream = DecodeStream::new(reader, StreamingDecoder::default(), &mut buffer);

    let mut decoded = String::new();
    for (i, chunk) in stream.enumerate() {
        let chunk = chunk?;
        println!("  chunk {:2}: {:?}", i, chunk);
        decoded.push_str(&chunk);
    }

    println!();
    println!("Decoded: {}", decoded);
    assert_eq!(decoded, &text[3..]);
    Ok(())
}
