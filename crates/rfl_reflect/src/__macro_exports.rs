//! Items named by code generated from `rfl_reflect_derive`.

pub use alloc::string::String;
pub use core::result::Result;

pub use crate::Reflect;
pub use crate::impls::{NonGenericFieldSetCell, NonGenericTypeReflectionCell};
pub use crate::info::{BaseClass, Class, FieldFlags, FieldInfo, FieldSet, Typed};
pub use crate::reflection::{cast, cast_mut};
pub use crate::registry::{TypeReflection, TypeRegistry};
pub use crate::text::{TextCodec, write_class_text};
pub use crate::wire::{Reader, Tag, WireCodec, WireError, Writer};
pub use crate::wire::{decode_instance, encode_instance, write_class_type_info};

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::Typed;
    use crate::registry::TypeRegistry;

    /// One submitted registration.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: Typed> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    // Always present, so an empty iteration means the platform lacks support.
    inventory::submit! {
        __AutoRegisterFunc(<() as __RegisterType>::__register)
    }

    /// Run every submitted registration, returning `false` if none was found.
    pub fn __register_types(registry: &mut TypeRegistry) -> bool {
        let mut found = false;
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
            found = true;
        }
        found
    }
}
