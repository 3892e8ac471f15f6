//! Incremental hash implementations, one per [`Algorithm`](crate::Algorithm).
//!
//! - [`Accumulator`] - Closed enum over the concrete hashers
//! - [`Blake3Hasher`] - BLAKE3 wrapper (requires `hash-blake3` feature)

mod accumulator;
#[cfg(feature = "hash-blake3")]
mod blake3;

pub(crate) use accumulator::Accumulator;

#[cfg(feature = "hash-blake3")]
pub(crate) use blake3::Blake3Hasher;
