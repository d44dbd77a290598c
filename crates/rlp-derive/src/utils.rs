use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn parse_struct<'a>(
    ast: &'a syn::DeriveInput,
    derive_name: &str,
) -> syn::Result<&'a syn::DataStruct> {
    match &ast.data {
        syn::Data::Struct(s) => Ok(s),
        _ => Err(syn::Error::new_spanned(
            ast,
            format!("`{derive_name}` is only defined for structs"),
        )),
    }
}

/// Whether a `#[rlp(...)]` attribute list names `ident`.
pub(crate) fn attributes_include(attrs: &[syn::Attribute], ident: &str) -> bool {
    let mut found = false;
    for attr in attrs {
        if attr.path().is_ident("rlp") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(ident) {
                    found = true;
                }
                Ok(())
            });
        }
    }
    found
}

pub(crate) fn field_ident(index: usize, field: &syn::Field) -> TokenStream {
    if let Some(ident) = &field.ident {
        quote!(#ident)
    } else {
        let index = syn::Index::from(index);
        quote!(#index)
    }
}

pub(crate) fn is_vec(field: &syn::Field) -> bool {
    if let syn::Type::Path(ty) = &field.ty {
        if let Some(segment) = ty.path.segments.last() {
            return segment.ident == "Vec";
        }
    }
    false
}

/// Clones `generics` with `trait_bound` added to every type parameter.
pub(crate) fn make_generics(generics: &syn::Generics, trait_bound: TokenStream) -> syn::Generics {
    let mut out = generics.clone();
    for param in out.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#trait_bound));
    }
    out
}
