//! Per-type reflection singletons and the type registry.
//!
//! - [`TypeReflection`]: name, wire tag, kind and type-erased codec entry
//!   points of one type.
//! - [`TypeRegistry`]: reflections indexed by [`TypeId`](core::any::TypeId) and
//!   by name; used to instantiate polymorphic values while decoding.
//! - [`TypeRegistryArc`]: a shareable, lock-protected registry.

// -----------------------------------------------------------------------------
// Modules

mod type_reflection;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_reflection::{TypeKind, TypeReflection};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
