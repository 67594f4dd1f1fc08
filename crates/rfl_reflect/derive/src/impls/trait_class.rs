use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::ReflectClass;

/// Generate implementation code for `Class`.
///
/// Each field gets a pair of accessor functions that downcast the owner to the
/// class and borrow the field. The base field, if any, gets the same pair as
/// the upcast of the `BaseClass` link.
///
/// Similar to following:
///
/// ```ignore
/// impl Class for Player {
///     fn field_set() -> &'static FieldSet {
///         fn get_0(owner: &dyn Reflect) -> &dyn Reflect {
///             &cast::<Player>(owner).score
///         }
///         // ...
///         CELL.get_or_init(|| {
///             FieldSet::new("Player", &[
///                 FieldInfo::new::<i64>("score", get_0, get_mut_0),
///             ])
///             .with_base(BaseClass::new::<Entity>(upcast, upcast_mut))
///         })
///     }
/// }
/// ```
pub(crate) fn impl_trait_class(class: &ReflectClass) -> TokenStream {
    let exports_ = crate::path::macro_exports_(class.rfl_reflect_path());
    let real_ident = class.ident();
    let type_name = class.type_name();

    let accessors = |member: &syn::Ident, get: &syn::Ident, get_mut: &syn::Ident| {
        quote! {
            fn #get(owner: &dyn #exports_::Reflect) -> &dyn #exports_::Reflect {
                &#exports_::cast::<#real_ident>(owner).#member
            }

            fn #get_mut(owner: &mut dyn #exports_::Reflect) -> &mut dyn #exports_::Reflect {
                &mut #exports_::cast_mut::<#real_ident>(owner).#member
            }
        }
    };

    let mut accessor_tokens = Vec::with_capacity(class.fields().len() + 1);
    let mut field_infos = Vec::with_capacity(class.fields().len());

    for (index, field) in class.fields().iter().enumerate() {
        let member = field.ident;
        let get = format_ident!("get_{}", index);
        let get_mut = format_ident!("get_mut_{}", index);
        accessor_tokens.push(accessors(member, &get, &get_mut));

        let ty = field.ty;
        let name = field.name();
        let flag_names = &field.attrs.flags;
        let with_flags = if flag_names.is_empty() {
            crate::utils::empty()
        } else {
            quote! {
                .with_flags(#exports_::FieldFlags::empty() #( .union(#exports_::FieldFlags::#flag_names) )*)
            }
        };

        field_infos.push(quote! {
            #exports_::FieldInfo::new::<#ty>(#name, #get, #get_mut) #with_flags
        });
    }

    let with_base = match class.base() {
        Some(base) => {
            let upcast = format_ident!("upcast");
            let upcast_mut = format_ident!("upcast_mut");
            accessor_tokens.push(accessors(base.ident, &upcast, &upcast_mut));

            let base_ty = base.ty;
            quote! {
                .with_base(#exports_::BaseClass::new::<#base_ty>(#upcast, #upcast_mut))
            }
        }
        None => crate::utils::empty(),
    };

    quote! {
        impl #exports_::Class for #real_ident {
            fn field_set() -> &'static #exports_::FieldSet {
                #( #accessor_tokens )*

                static CELL: #exports_::NonGenericFieldSetCell =
                    #exports_::NonGenericFieldSetCell::new();
                CELL.get_or_init(|| {
                    #exports_::FieldSet::new(#type_name, &[ #( #field_infos ),* ])
                        #with_base
                })
            }
        }
    }
}
