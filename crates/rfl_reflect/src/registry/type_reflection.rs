use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Reflect;
use crate::info::{Class, FieldFlags, FieldSet, Typed};
use crate::reflection::{cast, cast_mut};
use crate::registry::TypeRegistry;
use crate::text::TextCodec;
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a reflected type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `()`, carries no data.
    Void,
    /// Booleans, bytes, integers and floats.
    Scalar,
    /// UTF-8 text.
    String,
    /// A variable-length homogeneous sequence.
    Sequence,
    /// A fixed-length homogeneous sequence.
    FixedArray,
    /// A type with a [`FieldSet`].
    Class,
    /// A holder whose concrete type is only known at runtime.
    Polymorphic,
}

// -----------------------------------------------------------------------------
// TypeReflection

/// The per-type reflection singleton.
///
/// Stores the type's name, wire tag and kind, and type-erased entry points
/// for binary encoding, type-information encoding and text conversion. Each
/// entry point receives values as `dyn Reflect` and requires them to be of
/// this type.
///
/// Obtained through [`Typed::type_reflection`]; there is exactly one per type
/// for the life of the process.
///
/// # Examples
///
/// ```
/// use rfl_reflect::info::Typed;
/// use rfl_reflect::registry::TypeKind;
/// use rfl_reflect::wire::Tag;
///
/// let reflection = <Vec<i32>>::type_reflection();
/// assert_eq!(reflection.name(), "Vec<i32>");
/// assert_eq!(reflection.kind(), TypeKind::Sequence);
/// assert_eq!(reflection.tag(), Tag::TypedArray);
///
/// let mut bytes = Vec::new();
/// reflection.serialize(&vec![1, -1], &mut bytes).unwrap();
/// assert_eq!(bytes, [0x02, 0x01, 0x41]);
/// ```
pub struct TypeReflection {
    ty_id: TypeId,
    name: &'static str,
    tag: Tag,
    kind: TypeKind,
    field_set: Option<fn() -> &'static FieldSet>,
    default: Option<fn() -> Box<dyn Reflect>>,
    dependencies: fn(&mut TypeRegistry),
    serialize: fn(&dyn Reflect, &mut dyn Writer) -> Result<(), WireError>,
    deserialize: fn(&mut dyn Reflect, &mut dyn Reader) -> Result<(), WireError>,
    serialize_type_info: fn(&mut dyn Writer) -> Result<(), WireError>,
    write_text: fn(&dyn Reflect, &mut String, FieldFlags),
    parse_text: fn(&mut dyn Reflect, &str) -> Result<(), WireError>,
}

fn serialize_erased<T: Reflect + Typed + WireCodec>(
    value: &dyn Reflect,
    writer: &mut dyn Writer,
) -> Result<(), WireError> {
    cast::<T>(value).encode(writer)
}

fn deserialize_erased<T: Reflect + Typed + WireCodec>(
    value: &mut dyn Reflect,
    reader: &mut dyn Reader,
) -> Result<(), WireError> {
    cast_mut::<T>(value).decode(reader)
}

fn write_text_erased<T: Reflect + Typed + TextCodec>(
    value: &dyn Reflect,
    out: &mut String,
    mask: FieldFlags,
) {
    cast::<T>(value).write_text(out, mask);
}

fn parse_text_erased<T: Reflect + Typed + TextCodec>(
    value: &mut dyn Reflect,
    text: &str,
) -> Result<(), WireError> {
    cast_mut::<T>(value).parse_text(text)
}

fn default_erased<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

fn no_dependencies(_: &mut TypeRegistry) {}

impl TypeReflection {
    /// Reflection of `T` with the given name and kind.
    ///
    /// The wire tag is `T::TAG`. The reflection has no default constructor, no
    /// field set and no dependencies until the corresponding `with_*` call.
    pub fn new<T>(name: &'static str, kind: TypeKind) -> Self
    where
        T: Reflect + Typed + WireCodec + TextCodec,
    {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            tag: T::TAG,
            kind,
            field_set: None,
            default: None,
            dependencies: no_dependencies,
            serialize: serialize_erased::<T>,
            deserialize: deserialize_erased::<T>,
            serialize_type_info: T::encode_type_info,
            write_text: write_text_erased::<T>,
            parse_text: parse_text_erased::<T>,
        }
    }

    /// Reflection of the class `T`, carrying its field set.
    pub fn class<T>(name: &'static str) -> Self
    where
        T: Class + WireCodec + TextCodec,
    {
        Self::new::<T>(name, TypeKind::Class).with_field_set(T::field_set)
    }

    /// Enable [`create_default`](Self::create_default).
    ///
    /// `T` must be the reflected type itself.
    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        debug_assert_eq!(TypeId::of::<T>(), self.ty_id);
        self.default = Some(default_erased::<T>);
        self
    }

    #[inline]
    pub fn with_field_set(mut self, field_set: fn() -> &'static FieldSet) -> Self {
        self.field_set = Some(field_set);
        self
    }

    /// Types registered alongside this one by [`TypeRegistry::register`].
    #[inline]
    pub fn with_dependencies(mut self, dependencies: fn(&mut TypeRegistry)) -> Self {
        self.dependencies = dependencies;
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the reflected type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// The static type name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type name of `value`, an instance of this type.
    ///
    /// For polymorphic holders this is the name of the held value's type;
    /// otherwise it is [`name`](Self::name).
    #[inline]
    pub fn type_name(&self, value: &dyn Reflect) -> &'static str {
        if self.is_polymorphic() {
            value.reflect_type_name()
        } else {
            self.name
        }
    }

    #[inline]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn is_polymorphic(&self) -> bool {
        self.kind == TypeKind::Polymorphic
    }

    #[inline]
    pub fn field_set(&self) -> Option<&'static FieldSet> {
        self.field_set.map(|field_set| field_set())
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh default-constructed instance, if the type allows it.
    #[inline]
    pub fn create_default(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|default| default())
    }

    pub(crate) fn register_dependencies(&self, registry: &mut TypeRegistry) {
        (self.dependencies)(registry);
    }

    /// Encode `value`, which must be of this type.
    #[inline]
    pub fn serialize(&self, value: &dyn Reflect, writer: &mut dyn Writer) -> Result<(), WireError> {
        (self.serialize)(value, writer)
    }

    /// Decode into `value` in place, which must be of this type.
    #[inline]
    pub fn deserialize(
        &self,
        value: &mut dyn Reflect,
        reader: &mut dyn Reader,
    ) -> Result<(), WireError> {
        (self.deserialize)(value, reader)
    }

    /// Write this type's type-information block.
    #[inline]
    pub fn serialize_type_info(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        (self.serialize_type_info)(writer)
    }

    /// Append the text form of `value` to `out`.
    #[inline]
    pub fn write_text(&self, value: &dyn Reflect, out: &mut String, mask: FieldFlags) {
        (self.write_text)(value, out, mask);
    }

    /// The text form of `value`.
    pub fn to_text(&self, value: &dyn Reflect, mask: FieldFlags) -> String {
        let mut out = String::new();
        self.write_text(value, &mut out, mask);
        out
    }

    /// Parse `text` into `value`.
    #[inline]
    pub fn parse_text(&self, value: &mut dyn Reflect, text: &str) -> Result<(), WireError> {
        (self.parse_text)(value, text)
    }
}

impl fmt::Debug for TypeReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeReflection")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
