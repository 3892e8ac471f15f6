//! Digest results.

use std::collections::BTreeMap;
use std::fmt;

use crate::algorithm::{Algorithm, AlgorithmSet};

/// The outcome for one algorithm in a [`DigestResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestEntry {
    /// Not computed yet.
    Pending,
    /// Lowercase hex digest of exactly [`Algorithm::hex_len`] characters.
    Computed(String),
    /// The algorithm could not finalize; the other entries are unaffected.
    Failed(String),
}

impl DigestEntry {
    /// Returns the hex digest if computed.
    pub fn hex(&self) -> Option<&str> {
        match self {
            DigestEntry::Computed(hex) => Some(hex),
            _ => None,
        }
    }

    /// Returns `true` if this entry failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, DigestEntry::Failed(_))
    }
}

/// Digests for one session, keyed by algorithm.
///
/// Produced once by [`DigestSet::finalize`](crate::DigestSet::finalize) and
/// read-only afterward. Iteration follows the canonical algorithm order.
///
/// # Example
///
/// ```
/// use digestrs::{compute_for_text, Algorithm};
///
/// let result = compute_for_text(b"", Algorithm::Md5)?;
/// assert_eq!(result.hex(Algorithm::Md5), Some("d41d8cd98f00b204e9800998ecf8427e"));
/// # Ok::<(), digestrs::DigestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    entries: BTreeMap<Algorithm, DigestEntry>,
    total_bytes: u64,
}

impl DigestResult {
    pub(crate) fn new(entries: BTreeMap<Algorithm, DigestEntry>, total_bytes: u64) -> Self {
        Self {
            entries,
            total_bytes,
        }
    }

    /// Creates a result with every algorithm marked [`DigestEntry::Pending`].
    ///
    /// Useful as a placeholder while a session is still running.
    pub fn pending(algorithms: impl Into<AlgorithmSet>) -> Self {
        let entries = algorithms
            .into()
            .iter()
            .map(|a| (a, DigestEntry::Pending))
            .collect();
        Self::new(entries, 0)
    }

    /// Returns the entry for `algorithm`, if it was requested.
    pub fn get(&self, algorithm: Algorithm) -> Option<&DigestEntry> {
        self.entries.get(&algorithm)
    }

    /// Returns the hex digest for `algorithm`, if it was computed.
    pub fn hex(&self, algorithm: Algorithm) -> Option<&str> {
        self.get(algorithm).and_then(DigestEntry::hex)
    }

    /// Iterates entries in canonical algorithm order.
    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &DigestEntry)> {
        self.entries.iter().map(|(a, e)| (*a, e))
    }

    /// Returns the set of algorithms present in this result.
    pub fn algorithms(&self) -> AlgorithmSet {
        self.entries.keys().copied().collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of bytes that were digested.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

impl fmt::Display for DigestResult {
    /// One `NAME: value` line per algorithm.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (algorithm, entry) in self.iter() {
            match entry {
                DigestEntry::Computed(hex) => writeln!(f, "{}: {}", algorithm, hex)?,
                DigestEntry::Pending => writeln!(f, "{}: pending", algorithm)?,
                DigestEntry::Failed(reason) => writeln!(f, "{}: failed ({})", algorithm, reason)?,
            }
        }
        Ok(())
    }
}
