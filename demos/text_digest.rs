//! Text digest example.
//!
//! Run with:
//!     cargo run --example text_digest -- "some text" [reference]

use std::env;

use digestrs::{AlgorithmSet, MatchStatus, compare_reference, compute_for_text};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "hello world".to_string());
    let reference = args.next().unwrap_or_default();

    println!("Digesting {} bytes of text\n", text.len());

    let result = compute_for_text(&text, AlgorithmSet::all())?;
    let statuses = compare_reference(&reference, &result);

    for (algorithm, entry) in result.iter() {
        let marker = match statuses.get(&algorithm) {
            Some(MatchStatus::Match) => "  <== match",
            _ => "",
        };
        println!(
            "{:>10}: {}{}",
            algorithm.name(),
            entry.hex().unwrap_or("-"),
            marker
        );
    }

    Ok(())
}
