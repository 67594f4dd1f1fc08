//! Reflection-driven binary serialization.
//!
//! A reflected class publishes a static [`FieldSet`]: its own fields plus an
//! optional link to its base class' set. [`ReflectedFields`] flattens that chain
//! into one indexable sequence, and every field value is encoded by the codec of
//! its declared type into a compact, tag-described binary stream.
//!
//! ## Menu
//!
//! - [`wire`]: tags, the sign-magnitude variable-length integer, stream and
//!   error contracts, class instance and schema codecs.
//! - [`info`]: field metadata ([`FieldInfo`], [`FieldSet`]) and the [`Typed`] trait.
//! - [`access`]: flattened field views over an instance.
//! - [`registry`]: per-type [`TypeReflection`] singletons and the [`TypeRegistry`].
//! - [`impls`]: reflection for built-in types and [`ReflectBox`].
//! - [`text`]: human-readable conversion of reflected values.
//! - [`api`]: caller-facing entry points.
//!
//! ## Example
//!
//! ```
//! use rfl_reflect::{api, derive::Reflect};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Entity {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Player {
//!     #[reflect(base)]
//!     entity: Entity,
//!     score: i64,
//! }
//!
//! let player = Player { entity: Entity { id: 7, name: "ana".into() }, score: -20 };
//!
//! let fields = api::reflect_fields(&player);
//! assert_eq!(fields.count(), 3);
//! assert_eq!(fields.at(0).name(), "score");
//! assert_eq!(fields.at(1).class_name(), "Entity");
//!
//! let mut bytes = Vec::new();
//! api::reflect_serialize(&player, &mut bytes).unwrap();
//!
//! let mut back = Player::default();
//! api::reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap();
//! assert_eq!(back, player);
//! ```
//!
//! [`FieldSet`]: info::FieldSet
//! [`FieldInfo`]: info::FieldInfo
//! [`Typed`]: info::Typed
//! [`ReflectedFields`]: access::ReflectedFields
//! [`TypeReflection`]: registry::TypeReflection
//! [`TypeRegistry`]: registry::TypeRegistry
//! [`ReflectBox`]: impls::ReflectBox
#![cfg_attr(docsrs, feature(doc_cfg))]

// Generated code names `rfl_reflect`, which must also resolve inside this crate.
extern crate self as rfl_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Internal macros

/// Codec tracing, compiled only into debug builds with the `debug` feature.
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        #[cfg(all(debug_assertions, feature = "debug"))]
        ::log::trace!($($arg)*);
    };
}

pub(crate) use debug_trace;

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod reflection;

pub mod access;
pub mod api;
pub mod impls;
pub mod info;
pub mod registry;
pub mod text;
pub mod wire;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use rfl_reflect_derive as derive;
