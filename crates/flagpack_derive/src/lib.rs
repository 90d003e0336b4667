mod field;
mod encode;
mod decode;
mod utils;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives `flagpack::FlagSet` for a struct of `bool` and `Option<bool>` fields.
///
/// Declaration order is flag order. Container attributes:
/// `#[flags(padding = "false" | "true" | "unknown", rename_all = "camelCase")]`.
/// Field attributes: `#[flag(rename = "...")]`, and `#[flag(default = true)]`
/// for the value a `bool` field takes when its flag decodes as unknown.
#[proc_macro_derive(FlagSet, attributes(flags, flag))]
pub fn flag_set(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let parsed = match utils::parse_flag_set(&input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors().into(),
    };

    let name = &parsed.ident;
    let (impl_generics, ty_generics, where_clause) = parsed.generics.split_for_impl();
    let names = parsed.fields.iter().map(|field| field.name.as_str());
    let padding = parsed.padding.to_tokens();
    let to_flags = encode::encode(&parsed.fields);
    let from_flags = decode::decode(&parsed.fields);

    quote! {
        impl #impl_generics ::flagpack::FlagSet for #name #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];
            const PADDING: ::flagpack::Padding = #padding;

            #to_flags

            #from_flags
        }
    }.into()
}
