//! Digest algorithm identifiers.
//!
//! - [`Algorithm`] - Closed set of supported digest algorithms
//! - [`AlgorithmSet`] - Compact, ordered set of algorithms for one session

use std::fmt;
use std::str::FromStr;

/// A supported digest algorithm.
///
/// Every variant has a fixed output length, so the lowercase hex encoding of
/// a digest always has exactly [`Algorithm::hex_len`] characters.
///
/// The declaration order is the canonical order used when iterating sets and
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// MD5 (128-bit).
    Md5,
    /// SHA-1 (160-bit).
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA3-256, the default SHA-3 width.
    Sha3,
    /// RIPEMD-160.
    Ripemd160,
    /// BLAKE3 with the default 256-bit output (requires `hash-blake3` feature).
    #[cfg(feature = "hash-blake3")]
    Blake3,
}

impl Algorithm {
    /// All algorithms, in canonical order.
    #[cfg(feature = "hash-blake3")]
    pub const ALL: &'static [Algorithm] = &[
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha3,
        Algorithm::Ripemd160,
        Algorithm::Blake3,
    ];

    /// All algorithms, in canonical order.
    #[cfg(not(feature = "hash-blake3"))]
    pub const ALL: &'static [Algorithm] = &[
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha3,
        Algorithm::Ripemd160,
    ];

    /// Returns the digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 => 28,
            Algorithm::Sha256 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
            Algorithm::Sha3 => 32,
            Algorithm::Ripemd160 => 20,
            #[cfg(feature = "hash-blake3")]
            Algorithm::Blake3 => 32,
        }
    }

    /// Returns the length of the lowercase hex encoding.
    pub const fn hex_len(self) -> usize {
        self.output_len() * 2
    }

    /// Returns the canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha224 => "SHA224",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha384 => "SHA384",
            Algorithm::Sha512 => "SHA512",
            Algorithm::Sha3 => "SHA3",
            Algorithm::Ripemd160 => "RIPEMD160",
            #[cfg(feature = "hash-blake3")]
            Algorithm::Blake3 => "BLAKE3",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown digest algorithm: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Parses a name such as `"sha256"`, `"SHA-256"` or `"ripemd-160"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let algorithm = match normalized.as_str() {
            "md5" => Algorithm::Md5,
            "sha1" => Algorithm::Sha1,
            "sha224" => Algorithm::Sha224,
            "sha256" => Algorithm::Sha256,
            "sha384" => Algorithm::Sha384,
            "sha512" => Algorithm::Sha512,
            "sha3" | "sha3256" => Algorithm::Sha3,
            "ripemd160" => Algorithm::Ripemd160,
            #[cfg(feature = "hash-blake3")]
            "blake3" => Algorithm::Blake3,
            _ => return Err(UnknownAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

/// A set of algorithms to compute in one session.
///
/// Stored as a bitset, so it is `Copy` and iterates in canonical order.
///
/// # Example
///
/// ```
/// use digestrs::{Algorithm, AlgorithmSet};
///
/// let set: AlgorithmSet = [Algorithm::Sha256, Algorithm::Md5].into_iter().collect();
/// let names: Vec<_> = set.iter().map(|a| a.name()).collect();
/// assert_eq!(names, ["MD5", "SHA256"]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlgorithmSet(u16);

impl AlgorithmSet {
    /// Creates an empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set containing every supported algorithm.
    pub fn all() -> Self {
        Algorithm::ALL.iter().copied().collect()
    }

    /// Adds an algorithm to the set.
    pub fn insert(&mut self, algorithm: Algorithm) {
        self.0 |= algorithm.bit();
    }

    /// Returns a copy of this set with `algorithm` added.
    pub fn with(mut self, algorithm: Algorithm) -> Self {
        self.insert(algorithm);
        self
    }

    /// Removes an algorithm from the set.
    pub fn remove(&mut self, algorithm: Algorithm) {
        self.0 &= !algorithm.bit();
    }

    /// Returns `true` if the set contains `algorithm`.
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.0 & algorithm.bit() != 0
    }

    /// Returns the number of algorithms in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the algorithms in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Algorithm> + '_ {
        Algorithm::ALL
            .iter()
            .copied()
            .filter(move |a| self.contains(*a))
    }
}

impl fmt::Debug for AlgorithmSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for AlgorithmSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, algorithm) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(algorithm.name())?;
        }
        Ok(())
    }
}

impl FromIterator<Algorithm> for AlgorithmSet {
    fn from_iter<I: IntoIterator<Item = Algorithm>>(iter: I) -> Self {
        let mut set = Self::empty();
        for algorithm in iter {
            set.insert(algorithm);
        }
        set
    }
}

impl From<Algorithm> for AlgorithmSet {
    fn from(algorithm: Algorithm) -> Self {
        Self::empty().with(algorithm)
    }
}

impl<const N: usize> From<[Algorithm; N]> for AlgorithmSet {
    fn from(algorithms: [Algorithm; N]) -> Self {
        algorithms.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_lengths() {
        assert_eq!(Algorithm::Md5.hex_len(), 32);
        assert_eq!(Algorithm::Sha1.hex_len(), 40);
        assert_eq!(Algorithm::Sha224.hex_len(), 56);
        assert_eq!(Algorithm::Sha256.hex_len(), 64);
        assert_eq!(Algorithm::Sha384.hex_len(), 96);
        assert_eq!(Algorithm::Sha512.hex_len(), 128);
        assert_eq!(Algorithm::Sha3.hex_len(), 64);
        assert_eq!(Algorithm::Ripemd160.hex_len(), 40);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("md5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert_eq!("SHA-256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("sha3-256".parse::<Algorithm>().unwrap(), Algorithm::Sha3);
        assert_eq!(
            " RIPEMD-160 ".parse::<Algorithm>().unwrap(),
            Algorithm::Ripemd160
        );
        assert!("sha3-512".parse::<Algorithm>().is_err());
        assert!("crc32".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for &algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn test_set_operations() {
        let mut set = AlgorithmSet::empty();
        assert!(set.is_empty());

        set.insert(Algorithm::Sha512);
        set.insert(Algorithm::Md5);
        set.insert(Algorithm::Md5);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Algorithm::Md5));
        assert!(!set.contains(Algorithm::Sha1));

        set.remove(Algorithm::Md5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Algorithm::Sha512]);
    }

    #[test]
    fn test_set_all_is_canonical_order() {
        let all = AlgorithmSet::all();
        assert_eq!(all.len(), Algorithm::ALL.len());
        assert_eq!(all.iter().collect::<Vec<_>>(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_set_display() {
        let set = AlgorithmSet::from([Algorithm::Sha3, Algorithm::Sha1]);
        assert_eq!(set.to_string(), "SHA1,SHA3");
    }
}
