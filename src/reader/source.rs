//! Input sources for a digest session.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bytes::Bytes;

use crate::error::DigestError;

/// A local byte source of known size, read sequentially.
pub struct FileSource<R = Box<dyn Read + Send>> {
    reader: R,
    total_size: u64,
}

impl<R: Read> FileSource<R> {
    /// Wraps `reader`, which must yield at least `total_size` bytes.
    pub fn new(reader: R, total_size: u64) -> Self {
        Self { reader, total_size }
    }

    /// Returns the declared size in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Splits the source into its reader and declared size.
    pub fn into_parts(self) -> (R, u64) {
        (self.reader, self.total_size)
    }
}

impl<R: Read + Send + 'static> FileSource<R> {
    /// Erases the reader type.
    pub fn boxed(self) -> FileSource {
        FileSource {
            reader: Box::new(self.reader),
            total_size: self.total_size,
        }
    }
}

impl FileSource<File> {
    /// Opens a local file, taking its size from the file metadata.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DigestError> {
        let file = File::open(path)?;
        let total_size = file.metadata()?.len();
        Ok(Self::new(file, total_size))
    }
}

impl<R> fmt::Debug for FileSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSource")
            .field("total_size", &self.total_size)
            .finish_non_exhaustive()
    }
}

/// The input of one session: an in-memory buffer or a file-like source.
///
/// Supplying a new input to a [`DigestEngine`](crate::DigestEngine) replaces
/// whatever session was in flight.
#[derive(Debug)]
pub enum InputSource {
    /// Whole in-memory content, digested synchronously.
    Text(Bytes),
    /// A sequential source of known size, digested chunk by chunk.
    File(FileSource),
}

impl InputSource {
    /// Creates a text input.
    pub fn text(content: impl Into<Bytes>) -> Self {
        InputSource::Text(content.into())
    }

    /// Creates a file input from any reader of known size.
    pub fn file<R: Read + Send + 'static>(reader: R, total_size: u64) -> Self {
        InputSource::File(FileSource::new(reader, total_size).boxed())
    }

    /// Returns the number of bytes the session will digest.
    pub fn total_size(&self) -> u64 {
        match self {
            InputSource::Text(bytes) => bytes.len() as u64,
            InputSource::File(source) => source.total_size(),
        }
    }
}

impl From<FileSource<File>> for InputSource {
    fn from(source: FileSource<File>) -> Self {
        InputSource::File(source.boxed())
    }
}
