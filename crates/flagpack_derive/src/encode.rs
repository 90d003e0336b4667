use proc_macro2::TokenStream;
use quote::quote;
use crate::field::{FieldKind, FlagField};

fn generate_encode_field(field: &FlagField) -> TokenStream {
    let ident = &field.ident;
    match field.kind {
        FieldKind::Bool => quote! { self.#ident },
        FieldKind::OptionBool => quote! { self.#ident.unwrap_or(false) },
    }
}

/// Body of `FlagSet::to_flags`, one value per field in declaration order.
pub fn encode(fields: &[FlagField]) -> TokenStream {
    let values = fields.iter().map(generate_encode_field);
    quote! {
        #[inline(always)]
        fn to_flags(&self) -> ::std::vec::Vec<bool> {
            ::std::vec![#(#values),*]
        }
    }
}
