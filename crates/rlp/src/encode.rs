//! The [`Encodable`] trait, its implementations for the supported shapes, and
//! the top-level encode entry points.

use crate::{
    error::{EncodeError, Result},
    pool, EncodeBuffer, EncodeReader, EMPTY_LIST_CODE, EMPTY_STRING_CODE,
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use std::{
    any::{Any, TypeId},
    io,
    sync::Arc,
};

/// A value with an RLP encoding.
///
/// Encoding rules, by shape:
///
/// - Unsigned integers encode as a string of their minimal big-endian bytes;
///   zero encodes as the empty string.
/// - Booleans encode as the integers `1` and `0`.
/// - `str` and byte sequences encode as strings. Sequences with a non-byte
///   element type encode as lists of their elements.
/// - `Option<T>` encodes `Some` by value; `None` falls back to
///   [`encode_absent`](Self::encode_absent) for `T`.
/// - Structs deriving [`RlpEncodable`](crate::RlpEncodable) encode as the
///   list of their fields in declaration order.
///
/// Types with custom encoding rules, or private state that the derive cannot
/// reach, implement this trait by hand. The buffer argument doubles as an
/// [`io::Write`] sink, and sub-values can be appended through
/// [`EncodeBuffer::append`]. The output is not verified: an implementation
/// is responsible for writing well-formed RLP.
pub trait Encodable {
    /// Appends the encoding of `self` to the buffer.
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()>;

    /// Appends the encoding used when a value of this type sits behind an
    /// absent indirection, e.g. the `None` arm of an `Option` field.
    ///
    /// Defaults to the empty string `0x80`, the encoding of the zero value
    /// of every scalar shape. Sequence shapes and derived structs emit the
    /// empty list `0xC0` instead.
    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()>
    where
        Self: Sized,
    {
        buf.push(EMPTY_STRING_CODE);
        Ok(())
    }
}

// Unsigned integers whose minimal bytes fit the buffer's scratch region.
macro_rules! uint_impl {
    ($($t:ty),* $(,)?) => {$(
        impl Encodable for $t {
            fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
                buf.encode_uint(*self as u64);
                Ok(())
            }
        }
    )*};
}

uint_impl!(u8, u16, u32, u64, usize);

impl Encodable for u128 {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        if *self < 128 {
            buf.encode_uint(*self as u64);
        } else {
            let be = self.to_be_bytes();
            buf.encode_string(&be[self.leading_zeros() as usize / 8..]);
        }
        Ok(())
    }
}

impl Encodable for bool {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        buf.push(if *self { 0x01 } else { EMPTY_STRING_CODE });
        Ok(())
    }
}

impl Encodable for str {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        buf.encode_string(self.as_bytes());
        Ok(())
    }
}

impl Encodable for String {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        buf.encode_string(self.as_bytes());
        Ok(())
    }
}

impl Encodable for [u8] {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        buf.encode_string(self);
        Ok(())
    }
}

impl Encodable for BigUint {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        if self.is_zero() {
            buf.push(EMPTY_STRING_CODE);
        } else {
            buf.encode_string(&self.to_bytes_be());
        }
        Ok(())
    }
}

impl Encodable for BigInt {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        if self.sign() == Sign::Minus {
            return Err(EncodeError::NegativeBigInt);
        }
        if self.is_zero() {
            buf.push(EMPTY_STRING_CODE);
        } else {
            buf.encode_string(&self.magnitude().to_bytes_be());
        }
        Ok(())
    }
}

// `Vec<u8>` and `[u8; N]` are strings while every other element type makes a
// list; coherence forces both meanings into one generic impl, split through
// `Any`.
impl<T: Encodable + 'static> Encodable for Vec<T> {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        if let Some(bytes) = <dyn Any>::downcast_ref::<Vec<u8>>(self) {
            buf.encode_string(bytes);
            Ok(())
        } else {
            encode_list(self, buf)
        }
    }

    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        buf.push(if TypeId::of::<T>() == TypeId::of::<u8>() {
            EMPTY_STRING_CODE
        } else {
            EMPTY_LIST_CODE
        });
        Ok(())
    }
}

impl<T: Encodable + 'static, const N: usize> Encodable for [T; N] {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        if let Some(bytes) = <dyn Any>::downcast_ref::<[u8; N]>(self) {
            buf.encode_string(bytes);
            Ok(())
        } else {
            encode_list(self, buf)
        }
    }

    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        buf.push(if TypeId::of::<T>() == TypeId::of::<u8>() {
            EMPTY_STRING_CODE
        } else {
            EMPTY_LIST_CODE
        });
        Ok(())
    }
}

impl<'a, T: Encodable + ?Sized> Encodable for &'a T {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        (**self).encode(buf)
    }
}

impl<T: Encodable> Encodable for Box<T> {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        (**self).encode(buf)
    }

    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        T::encode_absent(buf)
    }
}

impl<T: Encodable> Encodable for Arc<T> {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        (**self).encode(buf)
    }

    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        T::encode_absent(buf)
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        match self {
            Some(value) => value.encode(buf),
            None => T::encode_absent(buf),
        }
    }

    // Chained indirections collapse onto the innermost shape.
    fn encode_absent(buf: &mut EncodeBuffer) -> Result<()> {
        T::encode_absent(buf)
    }
}

/// Pre-encoded RLP, spliced into the output verbatim.
///
/// The bytes are asserted by the caller to be valid RLP; they are not
/// verified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawValue(Vec<u8>);

impl RawValue {
    /// Wraps already-encoded RLP bytes.
    pub fn new(rlp: Vec<u8>) -> Self {
        Self(rlp)
    }

    /// The wrapped encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwraps into the raw encoding.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(rlp: Vec<u8>) -> Self {
        Self(rlp)
    }
}

impl Encodable for RawValue {
    fn encode(&self, buf: &mut EncodeBuffer) -> Result<()> {
        buf.write_raw(&self.0);
        Ok(())
    }

    // The zero raw value is empty and contributes nothing.
    fn encode_absent(_buf: &mut EncodeBuffer) -> Result<()> {
        Ok(())
    }
}

/// Encodes a slice as an RLP list of its elements.
pub fn encode_list<T: Encodable>(values: &[T], buf: &mut EncodeBuffer) -> Result<()> {
    let mark = buf.begin_list();
    for value in values {
        value.encode(buf)?;
    }
    buf.end_list(mark);
    Ok(())
}

/// Encodes `value` and streams the result to `out`.
///
/// The write happens only after the value has encoded completely; a sink
/// error cuts the stream at that point and is returned verbatim. `out` may
/// see a partial prefix in that case.
pub fn encode_to_writer<T, W>(value: &T, out: &mut W) -> Result<()>
where
    T: Encodable + ?Sized,
    W: io::Write + ?Sized,
{
    let mut buf = pool::acquire();
    let result =
        value.encode(&mut buf).and_then(|()| buf.write_to(out).map_err(EncodeError::from));
    pool::release(buf);
    result
}

/// Encodes `value` into a contiguous byte vector.
pub fn encode_to_vec<T: Encodable + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = pool::acquire();
    let result = value.encode(&mut buf).map(|()| buf.to_vec());
    pool::release(buf);
    if let Ok(out) = &result {
        trace!(size = out.len(), "encoded value");
    }
    result
}

/// Encodes `value` and returns the total encoded size together with a reader
/// over the encoding.
///
/// The reader owns its buffer until it is exhausted or dropped, then returns
/// it to the buffer pool.
pub fn encode_to_reader<T: Encodable + ?Sized>(value: &T) -> Result<(usize, EncodeReader)> {
    let mut buf = pool::acquire();
    match value.encode(&mut buf) {
        Ok(()) => {
            let size = buf.encoded_size();
            trace!(size, "handing encode buffer to reader");
            Ok((size, EncodeReader::new(buf)))
        }
        Err(err) => {
            pool::release(buf);
            Err(err)
        }
    }
}
