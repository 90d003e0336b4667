use proc_macro2::TokenStream;
use quote::quote;
use crate::field::{FieldKind, FlagField};

fn generate_decode_field(field: &FlagField, index: usize) -> TokenStream {
    let ident = &field.ident;
    let value = quote! { values.get(#index).copied().flatten() };
    match field.kind {
        FieldKind::Bool => {
            let default = field.default;
            quote! { #ident: #value.unwrap_or(#default) }
        }
        FieldKind::OptionBool => quote! { #ident: #value },
    }
}

/// Body of `FlagSet::from_flags`. Missing entries decode as unknown.
pub fn decode(fields: &[FlagField]) -> TokenStream {
    let assignments = fields
        .iter()
        .enumerate()
        .map(|(index, field)| generate_decode_field(field, index));
    quote! {
        #[inline(always)]
        #[allow(unused_variables)]
        fn from_flags(values: &[::core::option::Option<bool>]) -> Self {
            Self {
                #(#assignments),*
            }
        }
    }
}
