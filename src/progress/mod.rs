//! Session progress.

/// Bytes digested so far in a session.
///
/// `bytes_processed` never decreases within a session. Text mode has no total
/// and is reported as complete immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Progress {
    /// Bytes fed to the digest set so far.
    pub bytes_processed: u64,
    /// Declared size of the source, if known.
    pub total_bytes: Option<u64>,
}

impl Progress {
    /// Creates progress for a source of `total_bytes`, nothing processed yet.
    pub const fn new(total_bytes: u64) -> Self {
        Self {
            bytes_processed: 0,
            total_bytes: Some(total_bytes),
        }
    }

    /// Progress of a completed in-memory digest.
    pub const fn instant(bytes: u64) -> Self {
        Self {
            bytes_processed: bytes,
            total_bytes: None,
        }
    }

    pub(crate) fn advance(&mut self, len: usize) {
        self.bytes_processed += len as u64;
    }

    /// Returns `floor(bytes_processed * 100 / total_bytes)`, clamped to 100.
    ///
    /// An unknown or zero total reports 100.
    pub fn percent(&self) -> u8 {
        match self.total_bytes {
            None | Some(0) => 100,
            Some(total) => {
                let pct = u128::from(self.bytes_processed) * 100 / u128::from(total);
                pct.min(100) as u8
            }
        }
    }

    /// Returns `true` once every declared byte has been processed.
    pub fn is_complete(&self) -> bool {
        match self.total_bytes {
            None => true,
            Some(total) => self.bytes_processed >= total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_floors() {
        let mut progress = Progress::new(3);
        progress.advance(1);
        assert_eq!(progress.percent(), 33);
        progress.advance(1);
        assert_eq!(progress.percent(), 66);
        progress.advance(1);
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_percent_clamped() {
        let progress = Progress {
            bytes_processed: 500,
            total_bytes: Some(100),
        };
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_percent_large_values_do_not_overflow() {
        let progress = Progress {
            bytes_processed: u64::MAX / 2,
            total_bytes: Some(u64::MAX),
        };
        assert_eq!(progress.percent(), 49);
    }

    #[test]
    fn test_empty_and_text_are_complete() {
        assert_eq!(Progress::new(0).percent(), 100);
        assert_eq!(Progress::instant(42).percent(), 100);
        assert!(Progress::instant(42).is_complete());
        assert!(!Progress::new(1).is_complete());
    }
}
