use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, spanned::Spanned};

use super::{FieldAttributes, FieldRole, TypeAttributes};

/// One reflected field.
pub(crate) struct ReflectField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl ReflectField<'_> {
    /// The field name as seen through reflection, without any `r#` prefix.
    pub fn name(&self) -> LitStr {
        LitStr::new(&self.ident.unraw().to_string(), self.ident.span())
    }
}

/// A struct accepted by `#[derive(Reflect)]`.
pub(crate) struct ReflectClass<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    rfl_reflect_path: syn::Path,
    /// Own fields in declaration order.
    fields: Vec<ReflectField<'a>>,
    base: Option<ReflectField<'a>>,
}

impl<'a> ReflectClass<'a> {
    pub fn from_derive_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let data = match &ast.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Reflect)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Reflect)]` does not support unions",
                ));
            }
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`#[derive(Reflect)]` does not support generic types",
            ));
        }

        let named = match &data.fields {
            Fields::Named(named) => Some(named),
            Fields::Unit => None,
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new(
                    unnamed.span(),
                    "`#[derive(Reflect)]` requires named fields",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::new();
        let mut base: Option<ReflectField<'a>> = None;
        for field in named.into_iter().flat_map(|named| named.named.iter()) {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            let reflect_field = ReflectField {
                ident,
                ty: &field.ty,
                attrs,
            };

            match reflect_field.attrs.role {
                FieldRole::Field => fields.push(reflect_field),
                FieldRole::Skip => {}
                FieldRole::Base => {
                    if let Some(previous) = &base {
                        let mut err = syn::Error::new(ident.span(), "a class has at most one base");
                        err.combine(syn::Error::new(previous.ident.span(), "first base here"));
                        return Err(err);
                    }
                    base = Some(reflect_field);
                }
            }
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            rfl_reflect_path: crate::path::rfl_reflect(),
            fields,
            base,
        })
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn rfl_reflect_path(&self) -> &syn::Path {
        &self.rfl_reflect_path
    }

    #[inline]
    pub fn fields(&self) -> &[ReflectField<'a>] {
        &self.fields
    }

    #[inline]
    pub fn base(&self) -> Option<&ReflectField<'a>> {
        self.base.as_ref()
    }

    /// The class name, `type_name` if given.
    pub fn type_name(&self) -> LitStr {
        match &self.attrs.type_name {
            Some(lit) => lit.clone(),
            None => LitStr::new(&self.ident.unraw().to_string(), self.ident.span()),
        }
    }

    /// Types registered alongside the class: the base, then each field type.
    pub fn dependency_types(&self) -> impl Iterator<Item = &'a Type> + '_ {
        self.base
            .iter()
            .chain(self.fields.iter())
            .map(|field| field.ty)
    }
}
