use crate::utils::{attributes_include, field_ident, is_vec, make_generics, parse_struct};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Result};

pub(crate) fn impl_encodable(ast: &syn::DeriveInput) -> Result<TokenStream> {
    let body = parse_struct(ast, "RlpEncodable")?;

    let serialized: Vec<(usize, &syn::Field)> = body
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !attributes_include(&field.attrs, "skip"))
        .collect();

    let mut encode_stmts = Vec::with_capacity(serialized.len());
    for (pos, &(index, field)) in serialized.iter().enumerate() {
        let tail = attributes_include(&field.attrs, "tail");
        if tail {
            if pos != serialized.len() - 1 {
                let msg = "`#[rlp(tail)]` is only allowed on the last encoded field";
                return Err(Error::new_spanned(field, msg));
            }
            if !is_vec(field) {
                let msg = "`#[rlp(tail)]` requires a `Vec<_>` field";
                return Err(Error::new_spanned(field, msg));
            }
        }

        let ident = field_ident(index, field);
        if tail {
            // Tail elements splice into the struct's own list framing.
            encode_stmts.push(quote! {
                for element in &self.#ident {
                    foundry_rlp::Encodable::encode(element, buf)?;
                }
            });
        } else {
            encode_stmts.push(quote! {
                foundry_rlp::Encodable::encode(&self.#ident, buf)?;
            });
        }
    }

    let name = &ast.ident;
    let generics = make_generics(&ast.generics, quote!(foundry_rlp::Encodable));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        const _: () = {
            extern crate foundry_rlp;

            impl #impl_generics foundry_rlp::Encodable for #name #ty_generics #where_clause {
                fn encode(
                    &self,
                    buf: &mut foundry_rlp::EncodeBuffer,
                ) -> foundry_rlp::Result<()> {
                    let mark = buf.begin_list();
                    #(#encode_stmts)*
                    buf.end_list(mark);
                    ::core::result::Result::Ok(())
                }

                fn encode_absent(
                    buf: &mut foundry_rlp::EncodeBuffer,
                ) -> foundry_rlp::Result<()> {
                    buf.write_raw(&foundry_rlp::EMPTY_LIST);
                    ::core::result::Result::Ok(())
                }
            }
        };
    })
}
