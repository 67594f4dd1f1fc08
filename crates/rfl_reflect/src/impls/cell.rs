//! Containers for static storage of reflection data.
//!
//! ## NonGenericTypeCell
//!
//! For non generic types. Internally an [`OnceLock<T>`], almost no additional cost.
//!
//! ## GenericTypeCell
//!
//! If the type is generic, the `static CELL` inside the function is shared by
//! every instantiation. Therefore the inner of this container is a map keyed by
//! [`TypeId`] wrapped in [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::TypeIdMap;
use crate::info::FieldSet;
use crate::registry::TypeReflection;

mod sealed {
    use super::{FieldSet, TypeReflection};

    pub trait TypedProperty: 'static {}

    impl TypedProperty for TypeReflection {}
    impl TypedProperty for FieldSet {}
}

use sealed::TypedProperty;

/// Container for static storage of non-generic reflection data.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Stores the [`TypeReflection`] of a non-generic type.
///
/// ## Example
///
/// ```
/// use rfl_reflect::impls::NonGenericTypeReflectionCell;
/// use rfl_reflect::info::Typed;
/// use rfl_reflect::registry::{TypeKind, TypeReflection};
/// use rfl_reflect::text::TextCodec;
/// use rfl_reflect::wire::{self, Reader, Tag, WireCodec, WireError, Writer};
/// use rfl_reflect::{Reflect, info::FieldFlags};
///
/// #[derive(Default)]
/// struct Meters(u32);
///
/// impl Typed for Meters {
///     fn type_reflection() -> &'static TypeReflection {
///         static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
///         CELL.get_or_init(|| TypeReflection::new::<Meters>("Meters", TypeKind::Scalar))
///     }
/// }
///
/// impl Reflect for Meters {}
///
/// impl WireCodec for Meters {
///     const TAG: Tag = Tag::SmvInt;
///     fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
///         wire::write_smv(writer, self.0)
///     }
///     fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
///         self.0 = wire::read_smv(reader)?;
///         Ok(())
///     }
/// }
///
/// impl TextCodec for Meters {
///     fn write_text(&self, out: &mut String, _: FieldFlags) {
///         out.push_str(&format!("{}m", self.0));
///     }
/// }
///
/// assert_eq!(Meters::type_reflection().name(), "Meters");
/// ```
pub type NonGenericTypeReflectionCell = NonGenericTypeCell<TypeReflection>;

/// Stores the [`FieldSet`] of a non-generic class.
pub type NonGenericFieldSetCell = NonGenericTypeCell<FieldSet>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the value stored in the cell.
    ///
    /// If the cell is empty, it is initialized from `f` first.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of reflection data with generics.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeReflection`] of every instantiation of a generic type.
///
/// ## Example
///
/// ```ignore
/// impl<T: Typed> Typed for Wrapper<T> {
///     fn type_reflection() -> &'static TypeReflection {
///         static CELL: GenericTypeReflectionCell = GenericTypeReflectionCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             let name = impls::concat(&["Wrapper<", T::type_reflection().name(), ">"]);
///             TypeReflection::new::<Self>(impls::leak_name(name), TypeKind::Class)
///         })
///     }
/// }
/// ```
pub type GenericTypeReflectionCell = GenericTypeCell<TypeReflection>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for the type `G`.
    ///
    /// If there is no entry found, a new one will be generated from `f`. No
    /// lock is held while `f` runs, so `f` may itself consult this cell for
    /// other instantiations.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
