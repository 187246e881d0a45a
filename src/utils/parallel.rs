//! Batch hashing with an optional rayon fan-out.
//!
//! Each message is still compressed sequentially; only independent messages
//! are spread across threads.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

use crate::hash::{digest_bytes, Digest};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

const DEFAULT_CHUNK_SIZE: usize = 64;

pub fn preferred_chunk_size(total_items: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        DEFAULT_CHUNK_SIZE.min(total_items.max(1))
    }
}

#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Switches batch fan-out on or off until the returned guard is dropped.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(not(feature = "parallel"))]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {}
}

/// Digests every message under the same secret, preserving input order.
pub fn digest_many<M: AsRef<[u8]> + Sync>(messages: &[M], secret: &[u8]) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    {
        if parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = preferred_chunk_size(messages.len());
            return messages
                .par_iter()
                .with_min_len(chunk)
                .map(|message| digest_bytes(message.as_ref(), secret))
                .collect();
        }
    }
    messages
        .iter()
        .map(|message| digest_bytes(message.as_ref(), secret))
        .collect()
}
