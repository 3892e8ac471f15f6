//! ChunkReader - fixed-size sequential windows over a byte source.
//!
//! # Example
//!
//! ```
//! use digestrs::ChunkReader;
//! use std::io::Cursor;
//!
//! let data = vec![7u8; 10];
//! let mut reader = ChunkReader::new(Cursor::new(&data), 10, 4)?;
//!
//! let mut lens = Vec::new();
//! while let Some(chunk) = reader.next_chunk()? {
//!     lens.push(chunk.len());
//! }
//! assert_eq!(lens, [4, 4, 2]);
//! # Ok::<(), digestrs::DigestError>(())
//! ```

use std::io::{ErrorKind, Read};

use crate::buffer::Buffer;
use crate::config::validate_chunk_size;
use crate::error::DigestError;

/// Reads a source of known size in fixed-size, contiguous chunks.
///
/// Each call to [`next_chunk`](ChunkReader::next_chunk) returns
/// `min(chunk_size, remaining)` bytes starting at the current offset. Chunks
/// never overlap, arrive in increasing offset order and sum to exactly
/// `total_size` bytes. Only one chunk is held in memory at a time.
///
/// If the source fails or ends before `total_size` bytes, the reader reports
/// a read failure and yields nothing further. It does not retry.
pub struct ChunkReader<R> {
    reader: R,
    buffer: Buffer,
    chunk_size: usize,
    total_size: u64,
    offset: u64,
    failed: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Creates a reader over `total_size` bytes of `reader`.
    ///
    /// Returns error if `chunk_size` is zero.
    pub fn new(reader: R, total_size: u64, chunk_size: usize) -> Result<Self, DigestError> {
        validate_chunk_size(chunk_size)?;

        // Never allocate more than the source can fill
        let buffer_len = total_size.min(chunk_size as u64) as usize;

        Ok(Self {
            reader,
            buffer: Buffer::with_len(buffer_len),
            chunk_size,
            total_size,
            offset: 0,
            failed: false,
        })
    }

    /// Returns the next chunk, or `None` once `total_size` bytes were read.
    ///
    /// The returned slice is only valid until the next call.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>, DigestError> {
        if self.failed {
            return Err(DigestError::Read(std::io::Error::other(
                "chunk reader already failed",
            )));
        }

        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(None);
        }

        let want = remaining.min(self.chunk_size as u64) as usize;
        let mut filled = 0;

        while filled < want {
            match self.reader.read(&mut self.buffer[filled..want]) {
                Ok(0) => {
                    self.failed = true;
                    return Err(DigestError::truncated(
                        self.total_size,
                        self.offset + filled as u64,
                    ));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Err(e.into());
                }
            }
        }

        self.offset += want as u64;
        Ok(Some(&self.buffer[..want]))
    }

    /// Returns the offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the declared size of the source.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Returns the number of bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.total_size - self.offset
    }

    /// Returns the configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns `true` once every byte was read.
    pub fn is_exhausted(&self) -> bool {
        self.offset == self.total_size
    }
}

impl<R> std::fmt::Debug for ChunkReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkReader")
            .field("chunk_size", &self.chunk_size)
            .field("total_size", &self.total_size)
            .field("offset", &self.offset)
            .field("failed", &self.failed)
            .finish()
    }
}
