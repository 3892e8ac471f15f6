//! Async file digest on tokio.
//!
//! `digest_async` works on any `futures_io::AsyncRead`; tokio files are
//! adapted with `tokio_util::compat`.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file

use std::env;

use digestrs::{AlgorithmSet, DigestConfig, SessionOutcome, digest_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let file = tokio::fs::File::open(&path).await?;
    let size = file.metadata().await?.len();
    println!("Digesting {} ({} bytes)\n", path, size);

    let task = digest_async(
        file.compat(),
        size,
        AlgorithmSet::all(),
        DigestConfig::default().with_chunk_size(256 * 1024),
    )?
    .with_progress(|p| eprint!("\r{:>3}%", p.percent()));

    // Cancel from another task on Ctrl-C
    let token = task.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    match task.await? {
        SessionOutcome::Completed(result) => {
            eprintln!();
            print!("{result}");
        }
        SessionOutcome::Cancelled => println!("\nCancelled"),
    }

    Ok(())
}
