use proc_macro2::TokenStream;
use quote::quote;

#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
pub enum FieldKind {
    Bool,
    OptionBool,
}

/// One struct field as it appears in the flag list.
#[derive(Clone, Debug)]
pub struct FlagField {
    pub ident: syn::Ident,
    pub name: String,
    pub kind: FieldKind,
    /// Value for a `bool` field when the decoded flag is unknown.
    pub default: bool,
}

impl FlagField {
    pub fn new(ident: syn::Ident, name: String, kind: FieldKind, default: bool) -> Self {
        FlagField { ident, name, kind, default }
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
pub enum PaddingAttr {
    False,
    True,
    Unknown,
}

impl PaddingAttr {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "false" => Some(PaddingAttr::False),
            "true" => Some(PaddingAttr::True),
            "unknown" => Some(PaddingAttr::Unknown),
            _ => None,
        }
    }

    pub fn to_tokens(self) -> TokenStream {
        match self {
            PaddingAttr::False => quote! { ::flagpack::Padding::False },
            PaddingAttr::True => quote! { ::flagpack::Padding::True },
            PaddingAttr::Unknown => quote! { ::flagpack::Padding::Unknown },
        }
    }
}
