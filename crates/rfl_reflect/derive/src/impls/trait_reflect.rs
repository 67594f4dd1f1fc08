use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectClass;

/// Generate implementation code for `Reflect`.
///
/// Every method has a default body driven by `Typed`.
pub(crate) fn impl_trait_reflect(class: &ReflectClass) -> TokenStream {
    let exports_ = crate::path::macro_exports_(class.rfl_reflect_path());
    let real_ident = class.ident();

    quote! {
        impl #exports_::Reflect for #real_ident {}
    }
}
