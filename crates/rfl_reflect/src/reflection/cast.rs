use crate::Reflect;
use crate::info::Typed;

/// Downcast a reflected value whose concrete type is known to be `T`.
///
/// Used by field accessors and codec thunks.
///
/// # Panics
///
/// Panics if the value is not a `T`; that is a wiring bug, not a data error.
#[inline]
pub fn cast<T: Reflect + Typed>(value: &dyn Reflect) -> &T {
    match value.downcast_ref::<T>() {
        Some(value) => value,
        None => mismatch::<T>(value),
    }
}

/// Mutable counterpart of [`cast`].
#[inline]
pub fn cast_mut<T: Reflect + Typed>(value: &mut dyn Reflect) -> &mut T {
    if !value.is::<T>() {
        mismatch::<T>(value);
    }
    match value.downcast_mut::<T>() {
        Some(value) => value,
        None => unreachable!(),
    }
}

#[cold]
#[inline(never)]
fn mismatch<T: Typed>(value: &dyn Reflect) -> ! {
    panic!(
        "reflected value type mismatch, expected `{}` but found `{}`",
        T::type_reflection().name(),
        value.reflect_type_name(),
    )
}
