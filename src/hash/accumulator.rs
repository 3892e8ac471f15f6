//! Per-algorithm incremental state.

use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::Sha3_256;

use crate::algorithm::Algorithm;

#[cfg(feature = "hash-blake3")]
use super::Blake3Hasher;

/// Incremental hash state for a single algorithm.
///
/// Each [`Algorithm`] maps to exactly one variant at compile time.
/// `finalize` takes `self`, so a finished accumulator cannot accept more input.
#[derive(Clone)]
pub(crate) enum Accumulator {
    Md5(Md5),
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Sha3(Sha3_256),
    Ripemd160(Ripemd160),
    #[cfg(feature = "hash-blake3")]
    Blake3(Blake3Hasher),
    /// Accumulator that panics on finalize, for exercising failure isolation.
    #[cfg(test)]
    Faulty,
}

impl Accumulator {
    /// Allocates fresh state for `algorithm`.
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Accumulator::Md5(Md5::new()),
            Algorithm::Sha1 => Accumulator::Sha1(Sha1::new()),
            Algorithm::Sha224 => Accumulator::Sha224(Sha224::new()),
            Algorithm::Sha256 => Accumulator::Sha256(Sha256::new()),
            Algorithm::Sha384 => Accumulator::Sha384(Sha384::new()),
            Algorithm::Sha512 => Accumulator::Sha512(Sha512::new()),
            Algorithm::Sha3 => Accumulator::Sha3(Sha3_256::new()),
            Algorithm::Ripemd160 => Accumulator::Ripemd160(Ripemd160::new()),
            #[cfg(feature = "hash-blake3")]
            Algorithm::Blake3 => Accumulator::Blake3(Blake3Hasher::new()),
        }
    }

    /// Feeds the next bytes of the stream.
    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            Accumulator::Md5(h) => h.update(data),
            Accumulator::Sha1(h) => h.update(data),
            Accumulator::Sha224(h) => h.update(data),
            Accumulator::Sha256(h) => h.update(data),
            Accumulator::Sha384(h) => h.update(data),
            Accumulator::Sha512(h) => h.update(data),
            Accumulator::Sha3(h) => h.update(data),
            Accumulator::Ripemd160(h) => h.update(data),
            #[cfg(feature = "hash-blake3")]
            Accumulator::Blake3(h) => h.update(data),
            #[cfg(test)]
            Accumulator::Faulty => {}
        }
    }

    /// Runs padding/finalization and returns the raw digest bytes.
    pub(crate) fn finalize(self) -> Vec<u8> {
        match self {
            Accumulator::Md5(h) => h.finalize().to_vec(),
            Accumulator::Sha1(h) => h.finalize().to_vec(),
            Accumulator::Sha224(h) => h.finalize().to_vec(),
            Accumulator::Sha256(h) => h.finalize().to_vec(),
            Accumulator::Sha384(h) => h.finalize().to_vec(),
            Accumulator::Sha512(h) => h.finalize().to_vec(),
            Accumulator::Sha3(h) => h.finalize().to_vec(),
            Accumulator::Ripemd160(h) => h.finalize().to_vec(),
            #[cfg(feature = "hash-blake3")]
            Accumulator::Blake3(h) => h.finalize(),
            #[cfg(test)]
            Accumulator::Faulty => panic!("faulty accumulator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_lengths_match_algorithm() {
        for &algorithm in Algorithm::ALL {
            let mut acc = Accumulator::new(algorithm);
            acc.update(b"abc");
            assert_eq!(acc.finalize().len(), algorithm.output_len(), "{algorithm}");
        }
    }

    #[test]
    fn test_split_updates_match_single_update() {
        for &algorithm in Algorithm::ALL {
            let mut split = Accumulator::new(algorithm);
            split.update(b"hello ");
            split.update(b"");
            split.update(b"world");

            let mut whole = Accumulator::new(algorithm);
            whole.update(b"hello world");

            assert_eq!(split.finalize(), whole.finalize(), "{algorithm}");
        }
    }
}
