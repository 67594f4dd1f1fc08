use proc_macro2::Span;
use syn::{Attribute, LitStr, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Type-level `#[reflect(...)]` options.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_name = "..."`, overriding the identifier.
    pub type_name: Option<LitStr>,
    /// `auto_register`
    pub auto_register: Option<Span>,
    /// `no_default`
    pub no_default: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_name") {
                    if parsed.type_name.is_some() {
                        return Err(meta.error("duplicate `type_name`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_name` must not be empty"));
                    }
                    parsed.type_name = Some(lit);
                } else if meta.path.is_ident("auto_register") {
                    parsed.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("no_default") {
                    parsed.no_default = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `type_name`, `auto_register` or `no_default`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}
