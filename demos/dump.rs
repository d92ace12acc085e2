//! Print every MessagePack value in a file (or stdin) as JSON.
//!
//! JSON object keys must be strings or integers, so a value holding a map keyed by anything else
//! (nil, floats, arrays, non-UTF-8 bytes) is printed in its `Debug` form instead, with a warning.
//!
//! ```text
//! cargo run --example dump -- data.mpk
//! RUST_LOG=msgpack_read=trace cargo run --example dump -- data.mpk
//! ```

use std::error::Error;
use std::io::Read;

use msgpack_read::{DecodeOptions, Decoder};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let data = match std::env::args().nth(1) {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let max_depth = std::env::var("DUMP_MAX_DEPTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(msgpack_read::MAX_DEPTH);
    let mut decoder = Decoder::with_options(&data, DecodeOptions::new().max_depth(max_depth));

    let mut count = 0;
    loop {
        let start = decoder.consumed();
        let Some(result) = decoder.next() else {
            break;
        };
        match result {
            Ok(value) => {
                match serde_json::to_string_pretty(&value) {
                    Ok(text) => println!("{}", text),
                    Err(err) => {
                        warn!("value #{} has no JSON form ({}), printing Debug", count, err);
                        println!("{:?}", value);
                    }
                }
                count += 1;
            }
            Err(err) => {
                eprintln!("value #{} starting at byte {}: {}", count, start, err);
                return Err(err.into());
            }
        }
    }
    eprintln!("{} values, {} bytes", count, decoder.consumed());
    Ok(())
}
