use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::cell::Cell;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeReflectionCell;
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection, TypeRegistry};
use crate::text::TextCodec;
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer};
use crate::wire::{read_string, write_class_type_info, write_str};

/// An owned value whose concrete type is only known at runtime.
///
/// A field declared as `ReflectBox` may hold any reflected type. On the wire
/// the value is preceded by the name of its concrete type, which is resolved
/// through [`TypeRegistry::global`] when decoding.
///
/// ```
/// use rfl_reflect::{impls::ReflectBox, wire::WireCodec};
///
/// let value = ReflectBox::new(String::from("hi"));
/// assert_eq!(value.type_name(), "String");
///
/// let mut bytes = Vec::new();
/// value.encode(&mut bytes).unwrap();
/// assert_eq!(bytes, b"\x06String\x02hi");
///
/// let mut decoded = ReflectBox::default();
/// decoded.decode(&mut bytes.as_slice()).unwrap();
/// assert_eq!(decoded.downcast_ref::<String>().unwrap(), "hi");
/// ```
pub struct ReflectBox(Box<dyn Reflect>);

impl ReflectBox {
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Box::new(value))
    }

    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(&self) -> &dyn Reflect {
        &*self.0
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.0
    }

    /// Replace the held value.
    #[inline]
    pub fn set<T: Reflect>(&mut self, value: T) {
        self.0 = Box::new(value);
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn Reflect> {
        self.0
    }

    /// Name of the held value's type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.0.reflect_type_name()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.downcast_mut::<T>()
    }
}

impl Default for ReflectBox {
    /// Holds `()`.
    #[inline]
    fn default() -> Self {
        Self::new(())
    }
}

impl From<Box<dyn Reflect>> for ReflectBox {
    #[inline]
    fn from(value: Box<dyn Reflect>) -> Self {
        Self(value)
    }
}

impl fmt::Debug for ReflectBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReflectBox").field(&self.0).finish()
    }
}

impl Typed for ReflectBox {
    fn type_reflection() -> &'static TypeReflection {
        static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
        CELL.get_or_init(|| {
            TypeReflection::new::<ReflectBox>("ReflectBox", TypeKind::Polymorphic)
                .with_default::<ReflectBox>()
        })
    }
}

impl Reflect for ReflectBox {
    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        self.0.reflect_type_name()
    }
}

/// Polymorphic values nested deeper than this fail to decode with
/// [`WireError::NestingTooDeep`].
pub const MAX_NESTING: usize = 64;

std::thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// One level of polymorphic decoding on this thread, released on drop.
struct NestingGuard;

impl NestingGuard {
    fn enter() -> Result<Self, WireError> {
        NESTING.with(|nesting| {
            let depth = nesting.get();
            if depth >= MAX_NESTING {
                return Err(WireError::nesting_too_deep(MAX_NESTING));
            }
            nesting.set(depth + 1);
            Ok(NestingGuard)
        })
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        NESTING.with(|nesting| nesting.set(nesting.get() - 1));
    }
}

/// Looks up the reflection named on the wire, in the global registry.
fn resolve(name: &str) -> Result<&'static TypeReflection, WireError> {
    let reflection = {
        let registry = TypeRegistry::global().read();
        registry.get_with_type_name(name)
    };
    reflection.ok_or_else(|| WireError::unknown_type(String::from(name)))
}

impl WireCodec for ReflectBox {
    const TAG: Tag = Tag::Class;

    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        let reflection = self.0.reflect_type_reflection();
        write_str(writer, reflection.name())?;
        reflection.serialize(&*self.0, writer)
    }

    /// Decodes in place when the held value already has the type named on the
    /// wire; otherwise a default instance of that type is decoded and swapped
    /// in on success.
    ///
    /// Fails with [`WireError::NestingTooDeep`] past [`MAX_NESTING`] levels.
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        let _guard = NestingGuard::enter()?;
        let name = read_string(reader)?;

        let current = self.0.reflect_type_reflection();
        if current.name() == name {
            crate::debug_trace!("decoding `{name}` in place");
            return current.deserialize(&mut *self.0, reader);
        }

        let reflection = resolve(&name)?;
        let mut value = reflection
            .create_default()
            .ok_or_else(|| WireError::unknown_type(name))?;
        crate::debug_trace!("decoding polymorphic value as `{}`", reflection.name());
        reflection.deserialize(&mut *value, reader)?;
        self.0 = value;
        Ok(())
    }

    fn encode_type_info(writer: &mut dyn Writer) -> Result<(), WireError> {
        write_class_type_info(writer, "ReflectBox")
    }
}

impl TextCodec for ReflectBox {
    #[inline]
    fn write_text(&self, out: &mut String, mask: FieldFlags) {
        self.0.reflect_type_reflection().write_text(&*self.0, out, mask);
    }

    #[inline]
    fn parse_text(&mut self, text: &str) -> Result<(), WireError> {
        self.0.reflect_type_reflection().parse_text(&mut *self.0, text)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn round_trip(value: &ReflectBox) -> ReflectBox {
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();
        let mut decoded = ReflectBox::default();
        let mut reader = bytes.as_slice();
        decoded.decode(&mut reader).unwrap();
        assert!(reader.is_empty());
        decoded
    }

    #[test]
    fn resolves_registered_types() {
        let decoded = round_trip(&ReflectBox::new(-7i64));
        assert_eq!(decoded.downcast_ref::<i64>(), Some(&-7));
        assert_eq!(decoded.type_name(), "i64");

        let decoded = round_trip(&ReflectBox::new(()));
        assert!(decoded.is::<()>());
    }

    #[test]
    fn nested_boxes() {
        let value = ReflectBox::new(ReflectBox::new(2.5f32));
        assert_eq!(value.type_name(), "f32");

        let decoded = round_trip(&value);
        let inner = decoded.downcast_ref::<ReflectBox>().unwrap();
        assert_eq!(inner.downcast_ref::<f32>(), Some(&2.5));
    }

    #[test]
    fn unknown_type_name() {
        let mut bytes = Vec::new();
        write_str(&mut bytes, "NotRegistered").unwrap();
        bytes.push(0);

        let mut value = ReflectBox::new(1u8);
        let err = value.decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::UnknownType(ref name) if name == "NotRegistered"));
        assert_eq!(value.downcast_ref::<u8>(), Some(&1));
    }

    #[test]
    fn nesting_limit() {
        let mut bytes = Vec::new();
        for _ in 0..(MAX_NESTING * 4) {
            write_str(&mut bytes, "ReflectBox").unwrap();
        }
        write_str(&mut bytes, "()").unwrap();

        let mut value = ReflectBox::new(1u8);
        let err = value.decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::NestingTooDeep { limit: MAX_NESTING }));
        assert_eq!(value.downcast_ref::<u8>(), Some(&1));

        // Depth is released after the failure.
        let mut value = ReflectBox::new(ReflectBox::new(ReflectBox::new(4u16)));
        let decoded = round_trip(&value);
        let inner = decoded.downcast_ref::<ReflectBox>().unwrap();
        let inner = inner.downcast_ref::<ReflectBox>().unwrap();
        assert_eq!(inner.downcast_ref::<u16>(), Some(&4));

        let mut bytes = Vec::new();
        for _ in 0..(MAX_NESTING - 1) {
            write_str(&mut bytes, "ReflectBox").unwrap();
        }
        write_str(&mut bytes, "u16").unwrap();
        bytes.push(0x09);
        value.decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(value.type_name(), "u16");
    }

    #[test]
    fn unregistered_type_decodes_in_place() {
        let value = ReflectBox::new(vec![3i16, -3]);
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();

        let mut decoded = ReflectBox::new(Vec::<i16>::new());
        decoded.decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded.downcast_ref::<Vec<i16>>().unwrap(), &[3, -3]);
    }

    #[test]
    fn text_follows_held_value() {
        let mut value = ReflectBox::new(10u32);
        let reflection = ReflectBox::type_reflection();
        assert_eq!(reflection.to_text(&value, FieldFlags::all()), "10");
        assert_eq!(reflection.type_name(&value), "u32");

        value.parse_text("12").unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&12));
    }
}
