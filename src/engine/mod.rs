//! Session orchestration.
//!
//! - [`DigestEngine`] - Runs one text or file session at a time
//! - [`SessionHandle`] - Observe, wait for or cancel a session
//! - [`Observer`] / [`Callbacks`] / [`SessionEvent`] - Progress and outcome delivery
//! - [`CancelToken`] - Cancellation flag shared with async tasks

mod driver;
mod observer;
mod session;
mod worker;

pub use driver::DigestEngine;
pub use observer::{Callbacks, Observer, SessionEvent};
pub use session::{CancelToken, SessionHandle, SessionOutcome, SessionState};

use crate::algorithm::AlgorithmSet;
use crate::digest::{DigestResult, DigestSet};
use crate::error::DigestError;

/// Digests in-memory content in one shot.
///
/// Equivalent to feeding `content` through any sequence of chunks.
///
/// # Example
///
/// ```
/// use digestrs::{compute_for_text, Algorithm};
///
/// let result = compute_for_text("abc", Algorithm::Sha256)?;
/// assert_eq!(
///     result.hex(Algorithm::Sha256),
///     Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
/// );
/// # Ok::<(), digestrs::DigestError>(())
/// ```
pub fn compute_for_text(
    content: impl AsRef<[u8]>,
    algorithms: impl Into<AlgorithmSet>,
) -> Result<DigestResult, DigestError> {
    DigestSet::digest(content.as_ref(), algorithms)
}
