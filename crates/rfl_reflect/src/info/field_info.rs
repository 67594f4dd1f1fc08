use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{FieldFlags, Typed};
use crate::registry::TypeReflection;

// -----------------------------------------------------------------------------
// FieldInfo

/// Descriptor of one declared field.
///
/// Holds the field's name, its [`FieldFlags`], its declared type, and a pair of
/// accessors that resolve the field inside an instance of the declaring class.
///
/// # Examples
///
/// ```
/// use rfl_reflect::{derive::Reflect, info::{Class, FieldFlags}};
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     #[reflect(config)]
///     speed: f32,
/// }
///
/// let info = Foo::field_set().field_at(0).unwrap();
/// assert!(info.type_is::<f32>());
/// assert_eq!(info.name(), "speed");
/// assert_eq!(info.flags(), FieldFlags::CONFIG);
///
/// let foo = Foo { speed: 2.5 };
/// assert_eq!(info.get(&foo).downcast_ref::<f32>(), Some(&2.5));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    ty_id: TypeId,
    name: &'static str,
    flags: FieldFlags,
    // Created on first access; a function pointer delays it.
    type_reflection: fn() -> &'static TypeReflection,
    get: fn(&dyn Reflect) -> &dyn Reflect,
    get_mut: fn(&mut dyn Reflect) -> &mut dyn Reflect,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] of declared type `T`.
    ///
    /// `get` and `get_mut` receive an instance of the declaring class and
    /// return the field inside it. Flags default to [`FieldFlags::STATE`].
    #[inline]
    pub fn new<T: Typed>(
        name: &'static str,
        get: fn(&dyn Reflect) -> &dyn Reflect,
        get_mut: fn(&mut dyn Reflect) -> &mut dyn Reflect,
    ) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            flags: FieldFlags::STATE,
            type_reflection: T::type_reflection,
            get,
            get_mut,
        }
    }

    #[inline]
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the `TypeId` of the declared type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the declared type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// The reflection of the declared type.
    #[inline]
    pub fn type_reflection(&self) -> &'static TypeReflection {
        (self.type_reflection)()
    }

    /// Name of the declared type.
    #[inline]
    pub fn static_type_name(&self) -> &'static str {
        self.type_reflection().name()
    }

    /// Whether the declared type holds values of varying concrete types.
    #[inline]
    pub fn is_polymorphic(&self) -> bool {
        self.type_reflection().is_polymorphic()
    }

    /// Resolve this field inside `owner`, an instance of the declaring class.
    ///
    /// # Panics
    ///
    /// Panics if `owner` is not an instance of the declaring class.
    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Reflect) -> &'a dyn Reflect {
        (self.get)(owner)
    }

    /// Mutable counterpart of [`FieldInfo::get`].
    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> &'a mut dyn Reflect {
        (self.get_mut)(owner)
    }
}
