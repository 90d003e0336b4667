use std::collections::HashSet;
use darling::{FromDeriveInput, FromField};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::Type;
use crate::field::{FieldKind, FlagField, PaddingAttr};

/// Largest field count a `u64` protected integer holds, the storage type of
/// `flagpack::encode`. One bit is the sentinel, matching `flagpack::max_fields::<u64>()`.
pub const MAX_FIELDS: usize = (u64::BITS - 1) as usize;

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(flags), supports(struct_named))]
pub struct FlagSetAttr {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<darling::util::Ignored, FlagFieldAttr>,
    pub padding: Option<String>,
    pub rename_all: Option<String>,
}

#[derive(Debug, FromField)]
#[darling(attributes(flag))]
pub struct FlagFieldAttr {
    pub ident: Option<syn::Ident>,
    pub ty: Type,
    pub rename: Option<String>,
    #[darling(default)]
    pub default: bool,
}

/// A parsed and validated `#[derive(FlagSet)]` input.
#[derive(Debug)]
pub struct FlagSetInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub padding: PaddingAttr,
    pub fields: Vec<FlagField>,
}

#[derive(Debug)]
pub struct TypeHelper<'a> {
    ty: &'a Type,
}

pub fn snake_to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut next_char_uppercase = false;

    for char in s.chars() {
        if char == '_' {
            next_char_uppercase = true;
        } else if next_char_uppercase {
            result.push(char.to_ascii_uppercase());
            next_char_uppercase = false;
        } else {
            result.push(char);
        }
    }

    result
}

impl<'a> TypeHelper<'a> {
    pub fn new(ty: &'a Type) -> Self {
        TypeHelper { ty }
    }

    pub fn get_type(&self) -> Option<String> {
        if let Type::Path(type_path) = &self.ty {
            let segments = &type_path.path.segments;
            if let Some(last) = segments.last() {
                return Some(last.ident.to_string());
            }
        }
        None
    }

    pub fn inner_type(&self) -> Option<TypeHelper<'a>> {
        if let Type::Path(type_path) = &self.ty {
            let segment = type_path.path.segments.last()?;
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(inner_type) = args.args.first().and_then(|a| match a {
                    syn::GenericArgument::Type(t) => Some(t),
                    _ => None,
                }) {
                    return Some(TypeHelper::new(inner_type));
                }
            }
        }
        None
    }

    pub fn full_type(&self) -> String {
        self.ty.to_token_stream().to_string()
    }

    /// `bool` or `Option<bool>`, matched by last path segment.
    pub fn flag_kind(&self) -> Option<FieldKind> {
        match self.get_type()?.as_str() {
            "bool" if self.inner_type().is_none() => Some(FieldKind::Bool),
            "Option" => {
                let inner = self.inner_type()?;
                if inner.get_type()?.as_str() == "bool" && inner.inner_type().is_none() {
                    Some(FieldKind::OptionBool)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn field_name(ident: &syn::Ident, attr: &FlagFieldAttr, rename_all: Option<&str>) -> String {
    if let Some(rename) = &attr.rename {
        return rename.clone();
    }
    let name = ident.unraw().to_string();
    match rename_all {
        Some("camelCase") => snake_to_camel_case(&name),
        _ => name,
    }
}

pub fn parse_flag_set(input: &syn::DeriveInput) -> Result<FlagSetInput, darling::Error> {
    let attr = FlagSetAttr::from_derive_input(input)?;
    let mut errors = darling::Error::accumulator();

    let padding = match attr.padding.as_deref() {
        None => PaddingAttr::False,
        Some(value) => PaddingAttr::parse(value).unwrap_or_else(|| {
            errors.push(darling::Error::custom(format!(
                "unknown padding '{}', expected \"false\", \"true\" or \"unknown\"",
                value
            )).with_span(&attr.ident));
            PaddingAttr::False
        }),
    };

    let rename_all = attr.rename_all.as_deref();
    if let Some(rule) = rename_all {
        if rule != "camelCase" && rule != "snake_case" {
            errors.push(darling::Error::custom(format!(
                "unknown rename_all rule '{}', expected \"camelCase\" or \"snake_case\"",
                rule
            )).with_span(&attr.ident));
        }
    }

    let struct_fields = attr.data.take_struct().map(|fields| fields.fields).unwrap_or_default();
    if struct_fields.len() > MAX_FIELDS {
        errors.push(darling::Error::custom(format!(
            "FlagSet holds at most {} fields, found {}",
            MAX_FIELDS,
            struct_fields.len()
        )).with_span(&attr.ident));
    }

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(struct_fields.len());
    for field_attr in &struct_fields {
        let Some(ident) = field_attr.ident.clone() else {
            continue;
        };

        let type_helper = TypeHelper::new(&field_attr.ty);
        let Some(kind) = type_helper.flag_kind() else {
            errors.push(darling::Error::custom(format!(
                "Field '{}' has type '{}', expected 'bool' or 'Option<bool>'",
                ident,
                type_helper.full_type()
            )).with_span(&field_attr.ty));
            continue;
        };

        if field_attr.default && kind == FieldKind::OptionBool {
            errors.push(darling::Error::custom(format!(
                "Field '{}' is optional; #[flag(default)] only applies to 'bool' fields",
                ident
            )).with_span(&ident));
        }

        let name = field_name(&ident, field_attr, rename_all);
        if !seen.insert(name.clone()) {
            errors.push(darling::Error::custom(format!("Flag name '{}' is used more than once", name)).with_span(&ident));
            continue;
        }

        fields.push(FlagField::new(ident, name, kind, field_attr.default));
    }

    errors.finish()?;

    Ok(FlagSetInput {
        ident: attr.ident,
        generics: attr.generics,
        padding,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_leaves_room_for_sentinel() {
        assert_eq!(MAX_FIELDS, 63);
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(snake_to_camel_case("dark_mode"), "darkMode");
        assert_eq!(snake_to_camel_case("beta"), "beta");
        assert_eq!(snake_to_camel_case("a_b_c"), "aBC");
    }

    #[test]
    fn recognises_flag_types() {
        let ty: Type = syn::parse_quote!(bool);
        assert_eq!(TypeHelper::new(&ty).flag_kind(), Some(FieldKind::Bool));

        let ty: Type = syn::parse_quote!(Option<bool>);
        assert_eq!(TypeHelper::new(&ty).flag_kind(), Some(FieldKind::OptionBool));

        let ty: Type = syn::parse_quote!(std::option::Option<bool>);
        assert_eq!(TypeHelper::new(&ty).flag_kind(), Some(FieldKind::OptionBool));

        let ty: Type = syn::parse_quote!(Option<u8>);
        assert_eq!(TypeHelper::new(&ty).flag_kind(), None);

        let ty: Type = syn::parse_quote!(u8);
        assert_eq!(TypeHelper::new(&ty).flag_kind(), None);
    }

    #[test]
    fn parses_attributes() {
        let input: syn::DeriveInput = syn::parse_quote! {
            #[flags(padding = "unknown", rename_all = "camelCase")]
            struct Features {
                dark_mode: bool,
                #[flag(rename = "beta")]
                beta_access: Option<bool>,
                #[flag(default = true)]
                r#async: bool,
            }
        };
        let parsed = parse_flag_set(&input).unwrap();
        assert_eq!(parsed.padding, PaddingAttr::Unknown);
        let names: Vec<_> = parsed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["darkMode", "beta", "async"]);
        assert!(parsed.fields[2].default);
        assert_eq!(parsed.fields[1].kind, FieldKind::OptionBool);
    }

    #[test]
    fn rejects_non_flag_fields_and_duplicates() {
        let input: syn::DeriveInput = syn::parse_quote! {
            struct Bad {
                count: u32,
                a: bool,
                #[flag(rename = "a")]
                b: bool,
            }
        };
        let err = parse_flag_set(&input).unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn rejects_unknown_padding() {
        let input: syn::DeriveInput = syn::parse_quote! {
            #[flags(padding = "maybe")]
            struct Bad {
                a: bool,
            }
        };
        assert!(parse_flag_set(&input).is_err());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: syn::DeriveInput = syn::parse_quote! {
            struct Bad(bool, bool);
        };
        assert!(parse_flag_set(&input).is_err());
    }
}
