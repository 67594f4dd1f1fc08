// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_class;
mod trait_codecs;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectClass;

use auto_register::get_auto_register_impl;
use trait_class::impl_trait_class;
use trait_codecs::impl_trait_codecs;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

/// Every implementation generated for a derived class.
pub(crate) fn impl_class(class: &ReflectClass) -> TokenStream {
    let typed_tokens = impl_trait_typed(class);
    let reflect_tokens = impl_trait_reflect(class);
    let class_tokens = impl_trait_class(class);
    let codec_tokens = impl_trait_codecs(class);
    let auto_register_tokens = get_auto_register_impl(class);

    quote! {
        const _: () = {
            #typed_tokens

            #reflect_tokens

            #class_tokens

            #codec_tokens

            #auto_register_tokens
        };
    }
}
