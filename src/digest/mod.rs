//! Multi-algorithm digest state and results.
//!
//! - [`DigestSet`] - One incremental accumulator per algorithm
//! - [`DigestResult`] - Finalized hex digests keyed by algorithm
//! - [`DigestEntry`] - Per-algorithm outcome (pending, computed, failed)

mod result;
mod set;

pub use result::{DigestEntry, DigestResult};
pub use set::DigestSet;
