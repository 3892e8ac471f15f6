//! Configuration for digest sessions.
//!
//! - [`DigestConfig`] - Read chunk size and default algorithm selection
//!
//! # Example
//!
//! ```
//! use digestrs::{Algorithm, AlgorithmSet, DigestConfig};
//!
//! // Defaults: 2 MiB chunks, every algorithm
//! let config = DigestConfig::default();
//!
//! // Smaller reads, only SHA-256
//! let config = DigestConfig::new(64 * 1024, AlgorithmSet::from(Algorithm::Sha256))?;
//!
//! # Ok::<(), digestrs::DigestError>(())
//! ```

use crate::algorithm::AlgorithmSet;
use crate::error::DigestError;

/// Default chunk size for file reads (2 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 2 * 1024 * 1024;

/// Configuration for digest sessions.
///
/// The chunk size bounds memory use in file mode: at most one chunk is held
/// per session, whatever the size of the source. It is fixed for the lifetime
/// of a session.
///
/// # Constraints
///
/// - `chunk_size` must be non-zero
/// - `algorithms` must not be empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestConfig {
    chunk_size: usize,
    algorithms: AlgorithmSet,
}

impl DigestConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if the chunk size is zero or no algorithm is selected.
    pub fn new(chunk_size: usize, algorithms: AlgorithmSet) -> Result<Self, DigestError> {
        validate_chunk_size(chunk_size)?;
        validate_algorithms(algorithms)?;

        Ok(Self {
            chunk_size,
            algorithms,
        })
    }

    /// Sets the chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the default algorithm selection.
    pub fn with_algorithms(mut self, algorithms: AlgorithmSet) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the default algorithm selection.
    pub fn algorithms(&self) -> AlgorithmSet {
        self.algorithms
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), DigestError> {
        Self::new(self.chunk_size, self.algorithms).map(|_| ())
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            algorithms: AlgorithmSet::all(),
        }
    }
}

pub(crate) fn validate_chunk_size(chunk_size: usize) -> Result<(), DigestError> {
    if chunk_size == 0 {
        return Err(DigestError::InvalidConfig {
            message: "chunk size must be non-zero",
        });
    }
    Ok(())
}

pub(crate) fn validate_algorithms(algorithms: AlgorithmSet) -> Result<(), DigestError> {
    if algorithms.is_empty() {
        return Err(DigestError::InvalidConfig {
            message: "at least one algorithm must be selected",
        });
    }
    Ok(())
}
