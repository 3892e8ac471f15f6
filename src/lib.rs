//! digestrs
//!
//! Streaming multi-algorithm digests for Rust.
//!
//! `digestrs` computes several digests (MD5, SHA-1, SHA-224/256/384/512,
//! SHA3-256, RIPEMD-160 and BLAKE3) of one input in a single pass. The input
//! is either an in-memory buffer or a file-like source of any size, read in
//! fixed-size chunks so memory use stays bounded. It is designed as the core
//! behind tools that:
//!
//! - show checksums of a file as it is being read
//! - verify a download against a published digest
//! - compare digests of pasted text
//!
//! The crate intentionally:
//! - does NOT persist digests
//! - does NOT read from the network
//! - does NOT resume an interrupted session
//!
//! It only does one thing: **Bytes in → hex digests out**
//!
//! # Text
//!
//! ```
//! use digestrs::{compare_reference, compute_for_text, Algorithm, AlgorithmSet, MatchStatus};
//!
//! let result = compute_for_text("", AlgorithmSet::all())?;
//! let statuses = compare_reference(" D41D8CD98F00B204E9800998ECF8427E ", &result);
//! assert_eq!(statuses[&Algorithm::Md5], MatchStatus::Match);
//! # Ok::<(), digestrs::DigestError>(())
//! ```
//!
//! # File
//!
//! ```no_run
//! use digestrs::{AlgorithmSet, Callbacks, DigestEngine, FileSource};
//!
//! fn main() -> Result<(), digestrs::DigestError> {
//!     let engine = DigestEngine::default();
//!     let source = FileSource::open("data.bin")?;
//!
//!     let callbacks = Callbacks::new(|result| print!("{result}"))
//!         .with_progress(|p| eprintln!("{}%", p.percent()))
//!         .with_error(|e| eprintln!("{e}"));
//!
//!     let session = engine.compute_for_file(source, AlgorithmSet::all(), callbacks, None)?;
//!     session.wait();
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use digestrs::{digest_async, Algorithm, DigestConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R, size: u64) -> Result<(), digestrs::DigestError> {
//!     let outcome = digest_async(reader, size, Algorithm::Sha256, DigestConfig::default())?
//!         .with_progress(|p| println!("{}%", p.percent()))
//!         .await?;
//!     println!("{:?}", outcome.into_result());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod algorithm;
mod config;
mod digest;
mod engine;
mod error;
mod matcher;
mod progress;
mod reader;

mod buffer; // internal (thread-local reuse)
mod hash; // internal per-algorithm state

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use algorithm::{Algorithm, AlgorithmSet, UnknownAlgorithm};
pub use config::{DEFAULT_CHUNK_SIZE, DigestConfig};
pub use digest::{DigestEntry, DigestResult, DigestSet};
pub use engine::{
    Callbacks, CancelToken, DigestEngine, Observer, SessionEvent, SessionHandle, SessionOutcome,
    SessionState, compute_for_text,
};
pub use error::DigestError;
pub use matcher::{MatchStatus, compare_reference, find_match};
pub use progress::Progress;
pub use reader::{ChunkReader, FileSource, InputSource};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncChunkReader, DigestTask, digest_async};
