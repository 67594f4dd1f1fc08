//! Static field metadata.
//!
//! ## Menu
//!
//! - [`Typed`]: obtain the [`TypeReflection`] of a type; [`DynamicTyped`] is
//!   its dynamic-dispatch counterpart for `dyn Reflect`.
//! - [`Class`]: a reflected type with fields; exposes its [`FieldSet`].
//! - [`FieldFlags`]: per-field category bits.
//! - [`FieldInfo`]: one field's name, flags, declared type and accessors.
//! - [`FieldSet`]: the fields a class declares itself, plus an optional link to
//!   its base class' set. Chains are acyclic and finite.
//!
//! [`TypeReflection`]: crate::registry::TypeReflection

// -----------------------------------------------------------------------------
// Modules

mod field_flags;
mod field_info;
mod field_set;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_flags::FieldFlags;
pub use field_info::FieldInfo;
pub use field_set::{BaseClass, FieldSet, FieldSetChain};
pub use typed::{Class, DynamicTyped, Typed};
