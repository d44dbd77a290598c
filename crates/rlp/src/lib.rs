//! Recursive Length Prefix (RLP) encoding, the serialization format of the
//! Ethereum wire and storage protocols.
//!
//! RLP knows two shapes: strings (opaque byte runs) and lists of nested
//! items. Values encode through the [`Encodable`] trait; integers become
//! their minimal big-endian bytes, byte sequences and `str` become strings,
//! other sequences and derived structs become lists. Output can be taken as
//! a `Vec<u8>`, streamed into any [`std::io::Write`], or pulled through an
//! [`EncodeReader`].
//!
//! # Examples
//!
//! ```
//! use foundry_rlp::{encode_to_vec, RlpEncodable};
//!
//! #[derive(RlpEncodable)]
//! struct Header {
//!     number: u64,
//!     parent: Vec<u8>,
//! }
//!
//! let bytes = encode_to_vec(&Header { number: 14, parent: vec![0xbe, 0xef] })?;
//! assert_eq!(bytes, [0xc4, 0x0e, 0x82, 0xbe, 0xef]);
//! # Ok::<(), foundry_rlp::EncodeError>(())
//! ```
//!
//! Values of runtime-determined shape go through [`Item`]:
//!
//! ```
//! use foundry_rlp::{encode_to_vec, Item};
//!
//! let item = Item::Array(vec![Item::Data(b"cat".to_vec()), Item::Data(b"dog".to_vec())]);
//! assert_eq!(encode_to_vec(&item)?, b"\xc8\x83cat\x83dog");
//! # Ok::<(), foundry_rlp::EncodeError>(())
//! ```

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
extern crate tracing;

mod buffer;
mod encode;
mod error;
mod item;
mod pool;
mod reader;

pub use buffer::{EncodeBuffer, ListMark};
pub use encode::{
    encode_list, encode_to_reader, encode_to_vec, encode_to_writer, Encodable, RawValue,
};
pub use error::{EncodeError, Result};
pub use item::Item;
pub use reader::EncodeReader;

pub use foundry_rlp_derive::RlpEncodable;

/// Tag byte of the zero-length string.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Tag byte of the zero-length list.
pub const EMPTY_LIST_CODE: u8 = 0xC0;

/// The complete RLP encoding of an empty string. Handy when implementing
/// [`Encodable`] by hand.
pub const EMPTY_STRING: [u8; 1] = [EMPTY_STRING_CODE];

/// The complete RLP encoding of an empty list. Handy when implementing
/// [`Encodable`] by hand.
pub const EMPTY_LIST: [u8; 1] = [EMPTY_LIST_CODE];

// Pulled in by the bench and integration-test targets only.
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use proptest as _;
