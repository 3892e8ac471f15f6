//! Internal buffer management for chunk reads.
//!
//! This module provides a thread-local buffer pool so that repeated sessions
//! on the same thread reuse their read buffer. It is an implementation detail
//! and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
