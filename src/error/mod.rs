//! Error types for digestrs.
//!
//! Only failures that end a session before it produces a result live here.
//! A single algorithm failing to finalize is not an error: it is recorded as
//! [`DigestEntry::Failed`](crate::DigestEntry::Failed) in the result.

use std::fmt;

/// Errors that can occur while configuring or running a digest session.
#[derive(Debug)]
pub enum DigestError {
    /// The source could not be read to its declared length.
    ///
    /// This is fatal to the session: no partial result is produced and the
    /// caller has to start again with a fresh source.
    Read(std::io::Error),

    /// The session worker thread could not be started.
    Worker(std::io::Error),

    /// Invalid configuration parameter.
    ///
    /// Raised synchronously, before any session starts.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl DigestError {
    /// Returns `true` if this is a read failure of the underlying source.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, DigestError::Read(_))
    }

    pub(crate) fn truncated(expected: u64, actual: u64) -> Self {
        DigestError::Read(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("source ended after {actual} of {expected} bytes"),
        ))
    }
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::Read(e) => write!(f, "read failure: {}", e),
            DigestError::Worker(e) => write!(f, "failed to start session worker: {}", e),
            DigestError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DigestError::Read(e) | DigestError::Worker(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DigestError {
    fn from(e: std::io::Error) -> Self {
        DigestError::Read(e)
    }
}
