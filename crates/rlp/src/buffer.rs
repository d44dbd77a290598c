//! The staging buffer behind every encode operation.
//!
//! A list header encodes the total size of the list's finalized contents,
//! which includes the headers of any nested lists. That size is unknown until
//! every child has been encoded, so headers cannot be written inline without
//! cascading shifts. The buffer therefore keeps two runs of state: `payload`,
//! an append-only byte run holding all string data, and `heads`, a registry of
//! list brackets recording where in `payload` each list starts and how wide it
//! turned out to be. The final stream is produced by interleaving the two.

use crate::{error::Result, Encodable, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use std::io;

/// Number of bytes needed to store `i` in big-endian with no leading zero
/// byte. Returns 1 for zero, matching the header size table.
pub(crate) fn int_size(i: u64) -> usize {
    (8 - i.leading_zeros() as usize / 8).max(1)
}

/// Writes `i` to the beginning of `buf` in minimal big-endian byte order and
/// returns the number of bytes written. `buf` must be at least 8 bytes long.
pub(crate) fn put_int(buf: &mut [u8], i: u64) -> usize {
    let size = int_size(i);
    buf[..size].copy_from_slice(&i.to_be_bytes()[8 - size..]);
    size
}

/// Size of a string or list header for a payload of `size` bytes.
pub(crate) fn head_size(size: u64) -> usize {
    if size < 56 {
        1
    } else {
        1 + int_size(size)
    }
}

/// Writes a string or list header to `buf` and returns its length.
/// `buf` must be at least 9 bytes long.
pub(crate) fn put_head(buf: &mut [u8], small_tag: u8, large_tag: u8, size: u64) -> usize {
    if size < 56 {
        buf[0] = small_tag + size as u8;
        1
    } else {
        let n = put_int(&mut buf[1..], size);
        buf[0] = large_tag + n as u8;
        n + 1
    }
}

/// Bookkeeping for one list bracket.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ListHead {
    /// Index into the payload run at which this list's contents begin.
    pub(crate) offset: usize,
    /// Until the bracket closes: the sum of header widths finalized before it
    /// opened. After: the total encoded size of the list contents, nested
    /// headers included.
    pub(crate) size: usize,
}

impl ListHead {
    /// Writes this header to `buf`, which must be at least 9 bytes long, and
    /// returns the encoded length.
    pub(crate) fn write(&self, buf: &mut [u8]) -> usize {
        put_head(buf, EMPTY_LIST_CODE, 0xF7, self.size as u64)
    }
}

/// Handle for an open list bracket, returned by [`EncodeBuffer::begin_list`]
/// and consumed by [`EncodeBuffer::end_list`].
#[derive(Debug)]
#[must_use = "an opened list must be closed with `end_list`"]
pub struct ListMark {
    index: usize,
}

/// Staging buffer for RLP output.
///
/// String data is appended as it is produced; list headers are registered as
/// brackets and only laid down when the buffer is drained through
/// [`to_vec`](Self::to_vec), [`write_to`](Self::write_to) or an
/// [`EncodeReader`](crate::EncodeReader).
///
/// The buffer implements [`io::Write`] (appending raw bytes, never failing),
/// so a manual [`Encodable`] implementation can treat it as an ordinary byte
/// sink.
#[derive(Debug, Default)]
pub struct EncodeBuffer {
    /// String data: everything except list headers.
    payload: Vec<u8>,
    /// All list headers, in bracket-open order.
    heads: Vec<ListHead>,
    /// Sum of the widths of all finalized list headers.
    heads_size: usize,
    /// Auxiliary buffer for composing integer and header encodings.
    scratch: [u8; 9],
}

impl EncodeBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the buffer for reuse, keeping its allocations.
    pub fn reset(&mut self) {
        self.payload.clear();
        self.heads.clear();
        self.heads_size = 0;
    }

    /// Appends raw bytes to the payload, without any framing.
    ///
    /// The bytes become part of the output verbatim; the caller is asserting
    /// that they are valid RLP in the position they are written.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.payload.extend_from_slice(bytes);
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.payload.push(byte);
    }

    /// Appends the string encoding of `b`: a lone byte below 0x80 stands for
    /// itself, anything else gets a string header first.
    pub fn encode_string(&mut self, b: &[u8]) {
        if b.len() == 1 && b[0] <= 0x7F {
            self.payload.push(b[0]);
        } else {
            self.encode_string_head(b.len());
            self.payload.extend_from_slice(b);
        }
    }

    /// Appends a string header for a payload of `len` bytes.
    pub fn encode_string_head(&mut self, len: usize) {
        if len < 56 {
            self.payload.push(EMPTY_STRING_CODE + len as u8);
        } else {
            let n = put_int(&mut self.scratch[1..], len as u64);
            self.scratch[0] = 0xB7 + n as u8;
            self.payload.extend_from_slice(&self.scratch[..n + 1]);
        }
    }

    /// Appends the encoding of an unsigned integer: `0x80` for zero, the
    /// byte itself below 128, otherwise a string header followed by the
    /// minimal big-endian bytes.
    pub fn encode_uint(&mut self, i: u64) {
        if i == 0 {
            self.payload.push(EMPTY_STRING_CODE);
        } else if i < 128 {
            self.payload.push(i as u8);
        } else {
            let n = put_int(&mut self.scratch[1..], i);
            self.scratch[0] = EMPTY_STRING_CODE + n as u8;
            self.payload.extend_from_slice(&self.scratch[..n + 1]);
        }
    }

    /// Opens a list bracket. Everything appended until the matching
    /// [`end_list`](Self::end_list) becomes the list's contents.
    pub fn begin_list(&mut self) -> ListMark {
        let index = self.heads.len();
        self.heads.push(ListHead { offset: self.payload.len(), size: self.heads_size });
        ListMark { index }
    }

    /// Closes the list bracket opened by `mark`, fixing the list's content
    /// size and the width of its header.
    pub fn end_list(&mut self, mark: ListMark) {
        // The open-time snapshot stored in `size` subtracts away every header
        // finalized before this bracket opened, leaving exactly the bytes the
        // list contributes: its payload slice plus descendant headers.
        let head = self.heads[mark.index];
        let size = self.encoded_size() - head.offset - head.size;
        self.heads[mark.index].size = size;
        self.heads_size += head_size(size as u64);
    }

    /// Reentrant encode: appends `value`'s encoding directly to this buffer.
    pub fn append<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Total size of the encoded output: payload bytes plus all finalized
    /// list headers.
    pub fn encoded_size(&self) -> usize {
        self.payload.len() + self.heads_size
    }

    /// Materializes the encoded output as a contiguous byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_size()];
        let mut strpos = 0;
        let mut pos = 0;
        for head in &self.heads {
            // String data before the header, then the header itself.
            let n = head.offset - strpos;
            out[pos..pos + n].copy_from_slice(&self.payload[strpos..head.offset]);
            pos += n;
            strpos = head.offset;
            pos += head.write(&mut out[pos..]);
        }
        // String data after the last list header.
        out[pos..].copy_from_slice(&self.payload[strpos..]);
        out
    }

    /// Streams the encoded output to `out`, stopping at the first sink error.
    pub fn write_to<W: io::Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        let mut strpos = 0;
        for i in 0..self.heads.len() {
            let head = self.heads[i];
            if head.offset > strpos {
                out.write_all(&self.payload[strpos..head.offset])?;
                strpos = head.offset;
            }
            let n = head.write(&mut self.scratch);
            out.write_all(&self.scratch[..n])?;
        }
        if strpos < self.payload.len() {
            out.write_all(&self.payload[strpos..])?;
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub(crate) fn heads(&self) -> &[ListHead] {
        &self.heads
    }
}

impl io::Write for EncodeBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.payload.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
