//! Byte sources and sequential chunk reads.
//!
//! - [`ChunkReader`] - Fixed-size windows over a source of known size
//! - [`FileSource`] - Local reader plus its declared size
//! - [`InputSource`] - Text or file input for one session

mod chunk_reader;
mod source;

pub use chunk_reader::ChunkReader;
pub use source::{FileSource, InputSource};
