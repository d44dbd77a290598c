//! Process-wide pool of encode buffers.
//!
//! Top-level encode operations borrow a buffer here and return it once the
//! output has been drained, so steady-state encoding does not allocate.

use crate::EncodeBuffer;
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

/// Buffers retained across operations. Beyond this the release path drops
/// the buffer instead, bounding idle memory.
const MAX_POOLED: usize = 32;

static POOL: Lazy<Mutex<Vec<EncodeBuffer>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Takes a buffer out of the pool, or creates one. The buffer is reset.
pub(crate) fn acquire() -> EncodeBuffer {
    let pooled = POOL.lock().unwrap_or_else(PoisonError::into_inner).pop();
    match pooled {
        Some(mut buf) => {
            buf.reset();
            buf
        }
        None => {
            trace!("encode buffer pool empty, allocating");
            EncodeBuffer::new()
        }
    }
}

/// Returns a buffer to the pool.
pub(crate) fn release(buf: EncodeBuffer) {
    let mut pool = POOL.lock().unwrap_or_else(PoisonError::into_inner);
    if pool.len() < MAX_POOLED {
        pool.push(buf);
    }
}
