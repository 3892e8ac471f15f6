//! DigestSet - one accumulator per algorithm, fed the same byte stream.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use crate::algorithm::{Algorithm, AlgorithmSet};
use crate::config::validate_algorithms;
use crate::error::DigestError;
use crate::hash::Accumulator;

use super::{DigestEntry, DigestResult};

/// Incremental digest state for one session.
///
/// Every [`update`](DigestSet::update) broadcasts the same bytes to every
/// accumulator, so all algorithms see an identical stream. Splitting a byte
/// sequence into chunks in any way yields the same result as a single update
/// with the whole sequence.
///
/// [`finalize`](DigestSet::finalize) consumes the set: a finalized state can
/// never be reused, and a new session always starts from a fresh set.
///
/// # Example
///
/// ```
/// use digestrs::{Algorithm, AlgorithmSet, DigestSet};
///
/// let mut set = DigestSet::new(AlgorithmSet::from([Algorithm::Md5, Algorithm::Sha256]))?;
/// set.update(b"ab");
/// set.update(b"c");
/// let result = set.finalize();
///
/// assert_eq!(
///     result.hex(Algorithm::Sha256),
///     Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
/// );
/// # Ok::<(), digestrs::DigestError>(())
/// ```
pub struct DigestSet {
    accumulators: Vec<(Algorithm, Accumulator)>,
    bytes: u64,
}

impl DigestSet {
    /// Allocates fresh state for every algorithm in `algorithms`.
    ///
    /// Returns error if the set is empty.
    pub fn new(algorithms: impl Into<AlgorithmSet>) -> Result<Self, DigestError> {
        let algorithms = algorithms.into();
        validate_algorithms(algorithms)?;

        Ok(Self {
            accumulators: algorithms
                .iter()
                .map(|a| (a, Accumulator::new(a)))
                .collect(),
            bytes: 0,
        })
    }

    /// Feeds the next chunk of the stream to every accumulator.
    pub fn update(&mut self, chunk: &[u8]) {
        for (_, accumulator) in &mut self.accumulators {
            accumulator.update(chunk);
        }
        self.bytes += chunk.len() as u64;
    }

    /// Returns the algorithms in this set.
    pub fn algorithms(&self) -> AlgorithmSet {
        self.accumulators.iter().map(|(a, _)| *a).collect()
    }

    /// Returns the number of bytes fed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes
    }

    /// Finalizes every accumulator and returns lowercase hex digests.
    ///
    /// An accumulator that panics or produces a digest of the wrong length
    /// is reported as [`DigestEntry::Failed`]; the other entries still
    /// finalize normally.
    pub fn finalize(self) -> DigestResult {
        let mut entries = BTreeMap::new();

        for (algorithm, accumulator) in self.accumulators {
            let entry = match panic::catch_unwind(AssertUnwindSafe(|| accumulator.finalize())) {
                Ok(bytes) if bytes.len() == algorithm.output_len() => {
                    DigestEntry::Computed(hex::encode(bytes))
                }
                Ok(bytes) => failed(
                    algorithm,
                    format!(
                        "expected {} output bytes, got {}",
                        algorithm.output_len(),
                        bytes.len()
                    ),
                ),
                Err(payload) => failed(algorithm, panic_message(payload.as_ref())),
            };
            entries.insert(algorithm, entry);
        }

        DigestResult::new(entries, self.bytes)
    }

    /// Convenience method to digest an in-memory buffer in one shot.
    pub fn digest(
        data: &[u8],
        algorithms: impl Into<AlgorithmSet>,
    ) -> Result<DigestResult, DigestError> {
        let mut set = Self::new(algorithms)?;
        set.update(data);
        Ok(set.finalize())
    }

    #[cfg(test)]
    pub(crate) fn replace_accumulator(&mut self, algorithm: Algorithm, accumulator: Accumulator) {
        for (a, acc) in &mut self.accumulators {
            if *a == algorithm {
                *acc = accumulator;
                return;
            }
        }
    }
}

impl std::fmt::Debug for DigestSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSet")
            .field("algorithms", &self.algorithms())
            .field("bytes", &self.bytes)
            .finish()
    }
}

fn failed(algorithm: Algorithm, reason: String) -> DigestEntry {
    tracing::warn!(%algorithm, %reason, "digest algorithm failed to finalize");
    DigestEntry::Failed(reason)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "algorithm panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_algorithm_set_rejected() {
        let err = DigestSet::new(AlgorithmSet::empty()).unwrap_err();
        assert!(matches!(err, DigestError::InvalidConfig { .. }));
    }

    #[test]
    fn test_known_vectors_abc() {
        let result = DigestSet::digest(b"abc", AlgorithmSet::all()).unwrap();

        assert_eq!(
            result.hex(Algorithm::Md5),
            Some("900150983cd24fb0d6963f7d28e17f72")
        );
        assert_eq!(
            result.hex(Algorithm::Sha1),
            Some("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(
            result.hex(Algorithm::Sha224),
            Some("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
        );
        assert_eq!(
            result.hex(Algorithm::Sha256),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            result.hex(Algorithm::Sha384),
            Some(
                "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
                 8086072ba1e7cc2358baeca134c825a7"
            )
        );
        assert_eq!(
            result.hex(Algorithm::Sha512),
            Some(
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                 2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
            )
        );
        assert_eq!(
            result.hex(Algorithm::Sha3),
            Some("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
        );
        assert_eq!(
            result.hex(Algorithm::Ripemd160),
            Some("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc")
        );
        assert_eq!(result.total_bytes(), 3);
    }

    #[test]
    fn test_known_vectors_empty() {
        let result = DigestSet::digest(b"", AlgorithmSet::all()).unwrap();

        assert_eq!(
            result.hex(Algorithm::Md5),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(
            result.hex(Algorithm::Sha1),
            Some("da39a3ee5e6b4b0d3255bfef95601890afd80709")
        );
        assert_eq!(
            result.hex(Algorithm::Sha224),
            Some("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
        );
        assert_eq!(
            result.hex(Algorithm::Sha256),
            Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        assert_eq!(
            result.hex(Algorithm::Sha3),
            Some("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
        );
        assert_eq!(
            result.hex(Algorithm::Ripemd160),
            Some("9c1185a5c5e9fc54612808977ee8f548b2258d31")
        );
    }

    #[test]
    fn test_hex_is_lowercase_and_fixed_length() {
        let result = DigestSet::digest(b"\xff\xfe\xfd", AlgorithmSet::all()).unwrap();
        for (algorithm, entry) in result.iter() {
            let hex = entry.hex().unwrap();
            assert_eq!(hex.len(), algorithm.hex_len());
            assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn test_chunked_updates_match_single_update() {
        let data: Vec<u8> = (0..10_000).map(|i| (i * 31 % 251) as u8).collect();
        let whole = DigestSet::digest(&data, AlgorithmSet::all()).unwrap();

        for chunk_size in [1, 7, 64, 1000, 9_999] {
            let mut set = DigestSet::new(AlgorithmSet::all()).unwrap();
            for chunk in data.chunks(chunk_size) {
                set.update(chunk);
            }
            assert_eq!(set.bytes_processed(), data.len() as u64);
            assert_eq!(set.finalize(), whole, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_failed_algorithm_does_not_abort_others() {
        let algorithms = AlgorithmSet::from([Algorithm::Md5, Algorithm::Sha256]);
        let mut set = DigestSet::new(algorithms).unwrap();
        set.replace_accumulator(Algorithm::Md5, Accumulator::Faulty);
        set.update(b"abc");

        let result = set.finalize();
        assert_eq!(
            result.get(Algorithm::Md5),
            Some(&DigestEntry::Failed("faulty accumulator".to_string()))
        );
        assert_eq!(
            result.hex(Algorithm::Sha256),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_only_requested_algorithms_present() {
        let result = DigestSet::digest(b"abc", Algorithm::Sha1).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.get(Algorithm::Md5).is_none());
    }
}
