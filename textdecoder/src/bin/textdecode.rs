// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use textdecoder::{DecodeStream, DecoderConfig, IoReader, StreamingDecoder};

/// Decode UTF-8 input the way a browser TextDecoder would.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file, stdin when omitted
    path: Option<PathBuf>,

    /// Encoding label
    #[arg(short, long, default_value = "utf-8")]
    label: String,

    /// Fail on malformed input instead of writing U+FFFD
    #[arg(long)]
    fatal: bool,

    /// Keep a leading byte order mark
    #[arg(long)]
    ignore_bom: bool,

    /// Bytes per read
    #[arg(long, default_value_t = 8192)]
    chunk_size: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = DecoderConfig::new()
        .with_fatal(args.fatal)
        .with_ignore_bom(args.ignore_bom);
    let decoder = match StreamingDecoder::new(&args.label, config) {
        Ok(decoder) => decoder,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let input: Box<dyn Read> = match &args.path {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error: Unable to open file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut buffer = vec![0u8; args.chunk_size.max(1)];
    let stream = DecodeStream::new(IoReader::new(input), decoder, &mut buffer);
    let mut stdout = io::stdout().lock();
    let mut chars = 0usize;
    for chunk in stream {
        let text = match chunk {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: Decoding failed: {}", e);
                std::process::exit(1);
            }
        };
        chars += text.chars().count();
        if let Err(e) = stdout.write_all(text.as_bytes()) {
            eprintln!("Error: Unable to write output: {}", e);
            std::process::exit(1);
        }
    }
    if let Err(e) = stdout.flush() {
        eprintln!("Error: Unable to write output: {}", e);
        std::process::exit(1);
    }
    info!("decoded {} characters", chars);
}
