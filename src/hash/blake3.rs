//! BLAKE3 accumulator.

/// A hasher that computes BLAKE3 digests with the default 32-byte output.
#[derive(Debug, Clone)]
pub(crate) struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Consumes the hasher and returns the digest bytes.
    pub(crate) fn finalize(self) -> Vec<u8> {
        self.state.finalize().as_bytes().to_vec()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental_hashing() {
        let mut hasher = Blake3Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");

        let expected = blake3::hash(b"hello world");
        assert_eq!(hasher.finalize(), expected.as_bytes().to_vec());
    }

    #[test]
    fn test_empty_input() {
        let digest = Blake3Hasher::new().finalize();
        assert_eq!(
            hex::encode(digest),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }
}
