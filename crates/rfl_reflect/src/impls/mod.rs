//! Reflection implementations for built-in types, and the static cells used to
//! implement [`Typed`](crate::info::Typed).
//!
//! | type                         | kind          | tag           |
//! |------------------------------|---------------|---------------|
//! | `()`                         | `Void`        | `Void`        |
//! | `bool`                       | `Scalar`      | `Bool`        |
//! | `u8`, `i8`                   | `Scalar`      | `Char`        |
//! | `i16..=i64`, `u16..=u64`, `isize`, `usize` | `Scalar` | `SmvInt` |
//! | `f32`, `f64`                 | `Scalar`      | `Real32`, `Real64` |
//! | `String`                     | `String`      | `Utf8`        |
//! | `Vec<T>`                     | `Sequence`    | `TypedArray`  |
//! | `[T; N]`                     | `FixedArray`  | `FixedArray`  |
//! | [`ReflectBox`]               | `Polymorphic` | `Class`       |

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod reflect_box;
mod scalar;
mod sequence;
mod string;
mod unit;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, GenericTypeReflectionCell, NonGenericTypeCell};
pub use cell::{NonGenericFieldSetCell, NonGenericTypeReflectionCell};
pub use reflect_box::{MAX_NESTING, ReflectBox};

use alloc::boxed::Box;
use alloc::string::String;

/// Concatenate `parts` into a new [`String`].
///
/// ```
/// assert_eq!(rfl_reflect::impls::concat(&["Vec<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|part| part.len()).sum());
    parts.iter().for_each(|part| out.push_str(part));
    out
}

/// Leak a type name computed once per type, so it can live in a `'static`
/// [`TypeReflection`](crate::registry::TypeReflection).
#[inline]
pub fn leak_name(name: String) -> &'static str {
    Box::leak(name.into_boxed_str())
}
