//! Async streaming support for digesting.
//!
//! This module provides asynchronous digesting using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`AsyncChunkReader`] - Stream of fixed-size chunks from an async reader
//! - [`digest_async`] - Future that digests an async reader, yielding per chunk
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;
mod task;

pub use stream::AsyncChunkReader;
pub use task::{DigestTask, digest_async};
