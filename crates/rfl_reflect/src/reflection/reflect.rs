use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::{DynamicTyped, FieldSet};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection.
///
/// Every value that can be traversed, serialized or printed through reflection
/// implements `Reflect`. It is usually derived:
///
/// ```
/// use rfl_reflect::{Reflect, derive::Reflect};
///
/// #[derive(Reflect, Default)]
/// struct Health {
///     current: i32,
///     max: i32,
/// }
///
/// let value: &dyn Reflect = &Health { current: 3, max: 10 };
/// assert_eq!(value.reflect_type_name(), "Health");
/// assert!(value.is::<Health>());
/// assert_eq!(value.reflect_field_set().unwrap().len(), 2);
/// ```
///
/// Built-in implementations cover `bool`, the integer and float primitives,
/// `String`, `Vec<T>`, `[T; N]`, `()` and [`ReflectBox`](crate::impls::ReflectBox).
///
/// ## Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead.
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a fully-reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Return the [`TypeId`] of underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The name of the value's class.
    ///
    /// Equal to the static type name, except for polymorphic holders which
    /// report the name of the value they hold.
    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        self.reflect_type_reflection().name()
    }

    /// The field set of the value's class, `None` for non-class values.
    #[inline]
    fn reflect_field_set(&self) -> Option<&'static FieldSet> {
        self.reflect_type_reflection().field_set()
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// ```
    /// # use rfl_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<u32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the boxed value to type `T`.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let boxed: Box<dyn Any> = self;
            boxed.downcast::<T>().map_err(|_| unreachable!())
        } else {
            Err(self)
        }
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = self
            .reflect_type_reflection()
            .to_text(self, crate::info::FieldFlags::all());
        write!(f, "{}({text})", self.reflect_type_name())
    }
}
