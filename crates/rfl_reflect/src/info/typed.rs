use crate::Reflect;
use crate::info::FieldSet;
use crate::registry::TypeReflection;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect).
/// A manual implementation stores the reflection in a static cell:
///
/// ```ignore
/// impl Typed for Foo {
///     fn type_reflection() -> &'static TypeReflection {
///         static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
///         CELL.get_or_init(|| TypeReflection::class::<Self>("Foo"))
///     }
/// }
/// ```
pub trait Typed: 'static {
    /// Returns the compile-time reflection of the underlying type.
    fn type_reflection() -> &'static TypeReflection;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
///
/// Auto impl for all types that implemented [`Typed`].
pub trait DynamicTyped {
    /// See [`Typed::type_reflection`].
    fn reflect_type_reflection(&self) -> &'static TypeReflection;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_reflection(&self) -> &'static TypeReflection {
        Self::type_reflection()
    }
}

// -----------------------------------------------------------------------------
// Class

/// A reflected type with its own [`FieldSet`].
pub trait Class: Reflect + Typed {
    fn field_set() -> &'static FieldSet;
}
