//! File digest example with progress and cancellation.
//!
//! Run with:
//!     cargo run --example file_digest -- /path/to/file [reference] [algorithms]
//!
//! `algorithms` is a comma-separated list such as `md5,sha256`.
//! Set `RUST_LOG=digestrs=debug` to see session events.

use std::env;
use std::sync::mpsc;

use digestrs::{
    Algorithm, AlgorithmSet, DigestConfig, DigestEngine, FileSource, SessionEvent, find_match,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let reference = args.next().unwrap_or_default();
    let algorithms = match args.next() {
        Some(list) => list
            .split(',')
            .map(str::parse::<Algorithm>)
            .collect::<Result<AlgorithmSet, _>>()?,
        None => AlgorithmSet::all(),
    };

    let source = FileSource::open(&path)?;
    println!("Digesting {} ({} bytes)\n", path, source.total_size());

    let engine = DigestEngine::new(DigestConfig::default().with_chunk_size(1024 * 1024));
    let (tx, rx) = mpsc::channel();
    let session = engine.compute_for_file(source, algorithms, tx, None)?;

    let mut last_percent = None;
    for event in rx {
        match event {
            SessionEvent::Progress(p) => {
                let percent = p.percent();
                if last_percent != Some(percent) {
                    eprint!("\r{:>3}%", percent);
                    last_percent = Some(percent);
                }
            }
            SessionEvent::Complete(result) => {
                eprintln!();
                print!("{result}");
                if !reference.is_empty() {
                    match find_match(&reference, &result) {
                        Some(algorithm) => println!("\nReference matches {algorithm}"),
                        None => println!("\nReference matches nothing"),
                    }
                }
            }
            SessionEvent::Error(e) => {
                eprintln!();
                return Err(e.into());
            }
        }
    }

    println!("Session ended: {:?}", session.wait());
    Ok(())
}
