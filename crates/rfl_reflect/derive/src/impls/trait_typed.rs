use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectClass;

/// Generate implementation code for `Typed`.
///
/// The reflection carries the default constructor unless `no_default` was
/// given, and registers the base class and every field type as dependencies.
pub(crate) fn impl_trait_typed(class: &ReflectClass) -> TokenStream {
    let exports_ = crate::path::macro_exports_(class.rfl_reflect_path());
    let real_ident = class.ident();
    let type_name = class.type_name();

    let with_default = if class.attrs().no_default.is_some() {
        crate::utils::empty()
    } else {
        quote! { .with_default::<#real_ident>() }
    };

    let dependency_types = class.dependency_types();

    quote! {
        impl #exports_::Typed for #real_ident {
            fn type_reflection() -> &'static #exports_::TypeReflection {
                fn register_dependencies(_registry: &mut #exports_::TypeRegistry) {
                    #( _registry.register::<#dependency_types>(); )*
                }

                static CELL: #exports_::NonGenericTypeReflectionCell =
                    #exports_::NonGenericTypeReflectionCell::new();
                CELL.get_or_init(|| {
                    #exports_::TypeReflection::class::<#real_ident>(#type_name)
                        #with_default
                        .with_dependencies(register_dependencies)
                })
            }
        }
    }
}
