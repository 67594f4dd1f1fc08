#[cfg(feature = "auto_register")]
use quote::quote_spanned;

use crate::derive_data::ReflectClass;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(class: &ReflectClass) -> proc_macro2::TokenStream {
    if let Some(span) = class.attrs().auto_register {
        let auto_register_ = crate::path::auto_register_(class.rfl_reflect_path());
        let real_ident = class.ident();

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    <#real_ident as #auto_register_::__RegisterType>::__register
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectClass) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
