//! Derive macro for the `foundry-rlp` `Encodable` trait.

#![warn(missing_docs, unused_crate_dependencies)]

mod en;
mod utils;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Encodable` for a struct, encoding the fields as an RLP list in
/// declaration order.
///
/// Field attributes:
/// - `#[rlp(skip)]` leaves the field out of the encoding.
/// - `#[rlp(tail)]` splices the elements of the field into the enclosing
///   list instead of framing them as a nested list. Only allowed on the last
///   encoded field, which must be a `Vec<_>`.
///
/// Behind an absent indirection (a `None` option field, for instance) a
/// derived struct encodes as the empty list.
#[proc_macro_derive(RlpEncodable, attributes(rlp))]
pub fn rlp_encodable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    en::impl_encodable(&ast).unwrap_or_else(syn::Error::into_compile_error).into()
}
