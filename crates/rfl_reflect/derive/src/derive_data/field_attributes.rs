use proc_macro2::Span;
use syn::{Attribute, Ident, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

/// How a struct field takes part in reflection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FieldRole {
    /// Listed in the class' own field set.
    #[default]
    Field,
    /// The embedded base class.
    Base,
    /// Invisible to reflection.
    Skip,
}

/// Field-level `#[reflect(...)]` options.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub role: FieldRole,
    role_span: Option<Span>,
    /// Names of the `FieldFlags` constants given, empty for the default.
    pub flags: Vec<Ident>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let path = &meta.path;
                if path.is_ident("base") {
                    parsed.set_role(FieldRole::Base, path.span())
                } else if path.is_ident("skip") {
                    parsed.set_role(FieldRole::Skip, path.span())
                } else if path.is_ident("config") {
                    parsed.push_flag("CONFIG", path.span())
                } else if path.is_ident("state") {
                    parsed.push_flag("STATE", path.span())
                } else if path.is_ident("transient") {
                    parsed.push_flag("TRANSIENT", path.span())
                } else {
                    Err(meta.error(
                        "unknown field attribute, expected `base`, `skip`, `config`, `state` or `transient`",
                    ))
                }
            })?;
        }

        if parsed.role != FieldRole::Field
            && let Some(flag) = parsed.flags.first()
        {
            return Err(syn::Error::new(
                flag.span(),
                "flags only apply to fields listed in the field set",
            ));
        }

        Ok(parsed)
    }

    fn set_role(&mut self, role: FieldRole, span: Span) -> syn::Result<()> {
        if let Some(previous) = self.role_span {
            let mut err = syn::Error::new(span, "a field is either `base` or `skip`, once");
            err.combine(syn::Error::new(previous, "first given here"));
            return Err(err);
        }
        self.role = role;
        self.role_span = Some(span);
        Ok(())
    }

    fn push_flag(&mut self, name: &str, span: Span) -> syn::Result<()> {
        if self.flags.iter().any(|flag| flag == name) {
            return Err(syn::Error::new(span, "duplicate flag"));
        }
        self.flags.push(Ident::new(name, span));
        Ok(())
    }
}
