//! Pull-reader view over an encode buffer.

use crate::{buffer::EncodeBuffer, pool};
use std::io;

/// Streaming reader returned by [`encode_to_reader`](crate::encode_to_reader).
///
/// Yields the same bytes [`EncodeBuffer::to_vec`] would produce, piece by
/// piece: payload runs interleaved with list headers composed on the fly.
/// The reader owns its encode buffer and returns it to the process-wide pool
/// exactly once, at end of stream or on drop, whichever comes first. Reads
/// after end of stream keep reporting `Ok(0)` without touching the released
/// buffer.
#[derive(Debug)]
pub struct EncodeReader {
    /// The buffer being drained; `None` once it has gone back to the pool.
    buf: Option<EncodeBuffer>,
    /// Index of the next list header to emit.
    head_idx: usize,
    /// Consumed prefix of the payload run.
    payload_pos: usize,
    /// Header bytes composed but not yet handed to the caller.
    head_buf: [u8; 9],
    head_len: usize,
    head_off: usize,
}

impl EncodeReader {
    pub(crate) fn new(buf: EncodeBuffer) -> Self {
        Self {
            buf: Some(buf),
            head_idx: 0,
            payload_pos: 0,
            head_buf: [0; 9],
            head_len: 0,
            head_off: 0,
        }
    }
}

impl io::Read for EncodeReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let mut n = 0;
        loop {
            if n == out.len() {
                return Ok(n);
            }
            // Header bytes left over from a partial read.
            if self.head_off < self.head_len {
                let m = (self.head_len - self.head_off).min(out.len() - n);
                out[n..n + m].copy_from_slice(&self.head_buf[self.head_off..self.head_off + m]);
                self.head_off += m;
                n += m;
                continue;
            }
            let Some(buf) = self.buf.as_ref() else { return Ok(n) };
            if let Some(&head) = buf.heads().get(self.head_idx) {
                if self.payload_pos < head.offset {
                    // Payload run before the next header.
                    let m = (head.offset - self.payload_pos).min(out.len() - n);
                    out[n..n + m]
                        .copy_from_slice(&buf.payload()[self.payload_pos..self.payload_pos + m]);
                    self.payload_pos += m;
                    n += m;
                } else {
                    self.head_len = head.write(&mut self.head_buf);
                    self.head_off = 0;
                    self.head_idx += 1;
                }
                continue;
            }
            if self.payload_pos < buf.payload().len() {
                // Payload tail after the last header.
                let m = (buf.payload().len() - self.payload_pos).min(out.len() - n);
                out[n..n + m]
                    .copy_from_slice(&buf.payload()[self.payload_pos..self.payload_pos + m]);
                self.payload_pos += m;
                n += m;
                continue;
            }
            // Exhausted: the buffer goes back to the pool on the first
            // end-of-stream encounter.
            if let Some(buf) = self.buf.take() {
                pool::release(buf);
            }
            return Ok(n);
        }
    }
}

impl Drop for EncodeReader {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            pool::release(buf);
        }
    }
}
