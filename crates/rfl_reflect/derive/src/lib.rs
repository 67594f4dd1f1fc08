//! See following macros:
//!
//! - [`Reflect`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Class Reflection Derivation
///
/// `#[derive(Reflect)]` on a struct with named fields implements:
///
/// - `Typed`: the type's `TypeReflection`, with a default constructor
/// - `Reflect`
/// - `Class`: the type's `FieldSet`, one `FieldInfo` per field in declaration order
/// - `WireCodec`: every field in flattened order, tag `Class`
/// - `TextCodec`: `{name = value, ...}`
///
/// Generic types, tuple structs, enums and unions are rejected. A unit struct
/// is a class without fields.
///
/// Every field type must itself be reflected, and the type must implement
/// `Default` unless `no_default` is given.
///
/// ## Type Attributes
///
/// ### Type name
///
/// The class name defaults to the type's identifier. It is written into
/// polymorphic values and schema records, and used for registry lookups.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_name = "game.Player")]
/// struct Player { /* ... */ }
/// ```
///
/// ### No default
///
/// Without a default constructor the type cannot be created by name, so it
/// cannot be decoded as the held value of a `ReflectBox`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(no_default)]
/// struct Handle { /* ... */ }
/// ```
///
/// ### Auto Registration
///
/// Submits the type to `TypeRegistry::auto_register`, so the global registry
/// knows it from the start. This attribute is a no-op when the `auto_register`
/// feature is disabled.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(auto_register)]
/// struct A { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// ### Base class
///
/// One field may be marked `base`. It is not listed among the class' own
/// fields; instead the class' field set links to the field type's set, and
/// flattened views continue into it after the own fields.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Player {
///     #[reflect(base)]
///     entity: Entity,
///     score: i64,
/// }
/// ```
///
/// ### Flags
///
/// Fields are `STATE` by default. `config`, `state` and `transient` replace the
/// default and may be combined.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Light {
///     #[reflect(config)]
///     color: [f32; 3],
///     #[reflect(config, state)]
///     intensity: f32,
///     #[reflect(transient)]
///     cached_radius: f32,
/// }
/// ```
///
/// ### Skip
///
/// A `skip` field is invisible to reflection: it is neither listed, encoded
/// nor printed.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectClass::from_derive_input(&ast) {
        Ok(class) => impls::impl_class(&class).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Add the type to the automatic registry.
///
/// If the feature is not enabled, this macro will not do anything.
///
/// The type must be concrete (no uncertain generic parameters).
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::Foo);
/// impl_auto_register!(Vec<u32>); // Ok
/// impl_auto_register!(Vec<T>); // Error
/// ```
///
/// This does not conflict with the `reflect(auto_register)` attribute.
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        use quote::quote;

        let type_path = parse_macro_input!(_input as syn::Type);

        let rfl_reflect_path = path::rfl_reflect();
        let auto_register_ = path::auto_register_(&rfl_reflect_path);

        TokenStream::from(quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
