use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectClass;

/// Generate implementation code for `WireCodec` and `TextCodec`.
///
/// Both walk the flattened field view of the class' field set.
pub(crate) fn impl_trait_codecs(class: &ReflectClass) -> TokenStream {
    let exports_ = crate::path::macro_exports_(class.rfl_reflect_path());
    let real_ident = class.ident();
    let type_name = class.type_name();

    quote! {
        impl #exports_::WireCodec for #real_ident {
            const TAG: #exports_::Tag = #exports_::Tag::Class;

            #[inline]
            fn encode(
                &self,
                writer: &mut dyn #exports_::Writer,
            ) -> #exports_::Result<(), #exports_::WireError> {
                #exports_::encode_instance(self, <Self as #exports_::Class>::field_set(), writer)
            }

            #[inline]
            fn decode(
                &mut self,
                reader: &mut dyn #exports_::Reader,
            ) -> #exports_::Result<(), #exports_::WireError> {
                #exports_::decode_instance(self, <Self as #exports_::Class>::field_set(), reader)
            }

            #[inline]
            fn encode_type_info(
                writer: &mut dyn #exports_::Writer,
            ) -> #exports_::Result<(), #exports_::WireError> {
                #exports_::write_class_type_info(writer, #type_name)
            }
        }

        impl #exports_::TextCodec for #real_ident {
            #[inline]
            fn write_text(&self, out: &mut #exports_::String, mask: #exports_::FieldFlags) {
                #exports_::write_class_text(self, <Self as #exports_::Class>::field_set(), out, mask);
            }
        }
    }
}
