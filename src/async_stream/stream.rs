//! Async chunk reader.
//!
//! Same contract as [`ChunkReader`](crate::ChunkReader), over
//! `futures_io::AsyncRead`, which keeps it runtime-agnostic.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use digestrs::AsyncChunkReader;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R, size: u64) -> Result<(), digestrs::DigestError> {
//!     let mut chunks = AsyncChunkReader::new(reader, size, 64 * 1024)?;
//!
//!     while let Some(chunk) = chunks.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::config::validate_chunk_size;
use crate::error::DigestError;

pin_project! {
    /// A stream of fixed-size chunks from an async reader of known size.
    ///
    /// Partial reads are kept across `Poll::Pending`, so every yielded chunk
    /// is exactly `min(chunk_size, remaining)` bytes.
    pub struct AsyncChunkReader<R> {
        #[pin]
        reader: R,
        buffer: Vec<u8>,
        filled: usize,
        chunk_size: usize,
        total_size: u64,
        offset: u64,
        finished: bool,
    }
}

impl<R> AsyncChunkReader<R> {
    /// Creates a chunk stream over `total_size` bytes of `reader`.
    ///
    /// Returns error if `chunk_size` is zero.
    pub fn new(reader: R, total_size: u64, chunk_size: usize) -> Result<Self, DigestError> {
        validate_chunk_size(chunk_size)?;

        Ok(Self {
            reader,
            buffer: vec![0u8; total_size.min(chunk_size as u64) as usize],
            filled: 0,
            chunk_size,
            total_size,
            offset: 0,
            finished: false,
        })
    }

    /// Returns the offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the declared size of the source.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}

impl<R: AsyncRead> Stream for AsyncChunkReader<R> {
    type Item = Result<Bytes, DigestError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        let remaining = *this.total_size - *this.offset;
        if remaining == 0 {
            *this.finished = true;
            return Poll::Ready(None);
        }

        let want = remaining.min(*this.chunk_size as u64) as usize;

        while *this.filled < want {
            let buf = &mut this.buffer[*this.filled..want];
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    let read = *this.offset + *this.filled as u64;
                    return Poll::Ready(Some(Err(DigestError::truncated(*this.total_size, read))));
                }
                Poll::Ready(Ok(n)) => *this.filled += n,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(DigestError::Read(e))));
                }
            }
        }

        let chunk = Bytes::copy_from_slice(&this.buffer[..want]);
        *this.filled = 0;
        *this.offset += want as u64;
        Poll::Ready(Some(Ok(chunk)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_size - self.offset;
        let chunks = remaining.div_ceil(self.chunk_size as u64) as usize;
        (0, Some(chunks))
    }
}
