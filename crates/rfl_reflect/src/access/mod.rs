//! Flattened field views over class instances.
//!
//! [`ReflectedFields`] and [`ReflectedFieldsMut`] present every field of an
//! instance, including inherited ones, as one indexable sequence: the class'
//! own fields first, then its base class' fields, recursively.

mod fields;

pub use fields::{Field, FieldMut, ReflectedFields, ReflectedFieldsMut};
