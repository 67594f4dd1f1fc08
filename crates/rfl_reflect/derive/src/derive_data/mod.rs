//! Parsed form of a `#[derive(Reflect)]` input.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod reflect_class;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{FieldAttributes, FieldRole};
pub(crate) use reflect_class::ReflectClass;
pub(crate) use type_attributes::TypeAttributes;
