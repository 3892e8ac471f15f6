//! Thread-local buffer pool for chunk read buffers.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::config::DEFAULT_CHUNK_SIZE;

/// Largest buffer capacity returned to the pool.
pub const MAX_POOLED_CAPACITY: usize = DEFAULT_CHUNK_SIZE * 2;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 2;

/// A reusable, zero-initialized byte buffer of fixed length.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool (or allocates one) and
    /// sizes it to exactly `len` bytes.
    pub fn with_len(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.clear();
        data.resize(len, 0);
        Self { data }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Return the buffer to the pool if it's not too large
        if self.data.capacity() <= MAX_POOLED_CAPACITY {
            self.data.clear();
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
