//! Self-describing class layouts.
//!
//! A schema record lists every field of a class in flattened order as
//! `(declaring class, field name, type information)`:
//!
//! ```text
//! [ClassSchema] count:smv ( class:utf8 field:utf8 type-info )*
//! ```
//!
//! Type information is the block each type's codec writes through
//! [`WireCodec::encode_type_info`](super::WireCodec::encode_type_info);
//! [`TypeDescriptor`] is its decoded form.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::{Reader, Tag, WireError, Writer};
use super::{check_tag, read_len, read_string, read_tag, write_len, write_str, write_tag};
use crate::info::{Class, FieldSet};
use crate::registry::TypeReflection;

/// Nesting limit of type-information blocks accepted by [`TypeDescriptor::read`].
const MAX_DEPTH: usize = 64;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Decoded type-information block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDescriptor {
    Void,
    Bool,
    Char,
    SmvInt,
    Real32,
    Real64,
    Utf8,
    /// Variable-length sequence of the element type.
    TypedArray(Box<TypeDescriptor>),
    FixedArray { len: usize, element: Box<TypeDescriptor> },
    /// A class, or a polymorphic holder, by name.
    Class(String),
}

impl TypeDescriptor {
    /// The tag that opens this block.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Void => Tag::Void,
            Self::Bool => Tag::Bool,
            Self::Char => Tag::Char,
            Self::SmvInt => Tag::SmvInt,
            Self::Real32 => Tag::Real32,
            Self::Real64 => Tag::Real64,
            Self::Utf8 => Tag::Utf8,
            Self::TypedArray(_) => Tag::TypedArray,
            Self::FixedArray { .. } => Tag::FixedArray,
            Self::Class(_) => Tag::Class,
        }
    }

    /// The descriptor of a reflected type, as its codec writes it.
    pub fn from_reflection(reflection: &TypeReflection) -> Result<Self, WireError> {
        let mut bytes = Vec::new();
        reflection.serialize_type_info(&mut bytes)?;
        Self::read(&mut bytes.as_slice())
    }

    pub fn read(reader: &mut dyn Reader) -> Result<Self, WireError> {
        Self::read_nested(reader, 0)
    }

    fn read_nested(reader: &mut dyn Reader, depth: usize) -> Result<Self, WireError> {
        if depth >= MAX_DEPTH {
            return Err(WireError::nesting_too_deep(MAX_DEPTH));
        }

        Ok(match read_tag(reader)? {
            Tag::Void => Self::Void,
            Tag::Bool => Self::Bool,
            Tag::Char => Self::Char,
            Tag::SmvInt => Self::SmvInt,
            Tag::Real32 => Self::Real32,
            Tag::Real64 => Self::Real64,
            Tag::Utf8 => Self::Utf8,
            Tag::TypedArray => Self::TypedArray(Box::new(Self::read_nested(reader, depth + 1)?)),
            Tag::FixedArray => {
                let len = read_len(reader)?;
                let element = Box::new(Self::read_nested(reader, depth + 1)?);
                Self::FixedArray { len, element }
            }
            Tag::Class => Self::Class(read_string(reader)?),
            tag @ (Tag::NoType | Tag::ClassSchema) => {
                return Err(WireError::unsupported(alloc::format!(
                    "{tag} does not start a type information block"
                )));
            }
        })
    }

    pub fn write(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_tag(writer, self.tag())?;
        match self {
            Self::TypedArray(element) => element.write(writer),
            Self::FixedArray { len, element } => {
                write_len(writer, *len)?;
                element.write(writer)
            }
            Self::Class(name) => write_str(writer, name),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypedArray(element) => write!(f, "TypedArray<{element}>"),
            Self::FixedArray { len, element } => write!(f, "FixedArray<{element}; {len}>"),
            Self::Class(name) => write!(f, "Class<{name}>"),
            other => f.write_str(other.tag().name()),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassSchema

/// One entry of a [`ClassSchema`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaField {
    /// The class that declares the field.
    pub class_name: String,
    pub field_name: String,
    pub ty: TypeDescriptor,
}

/// The flattened field layout of a class.
///
/// # Examples
///
/// ```
/// use rfl_reflect::derive::Reflect;
/// use rfl_reflect::wire::{ClassSchema, TypeDescriptor};
///
/// #[derive(Reflect, Default)]
/// struct Sample {
///     values: Vec<i32>,
///     label: String,
/// }
///
/// let schema = ClassSchema::of::<Sample>().unwrap();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.fields[0].field_name, "values");
/// assert_eq!(schema.fields[0].ty, TypeDescriptor::TypedArray(Box::new(TypeDescriptor::SmvInt)));
///
/// let mut bytes = Vec::new();
/// schema.write_record(&mut bytes).unwrap();
/// assert_eq!(ClassSchema::read_record(&mut bytes.as_slice()).unwrap(), schema);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSchema {
    pub fields: Vec<SchemaField>,
}

impl ClassSchema {
    /// The schema of `T` built from its field set.
    pub fn of<T: Class>() -> Result<Self, WireError> {
        Self::from_field_set(T::field_set())
    }

    pub fn from_field_set(field_set: &FieldSet) -> Result<Self, WireError> {
        let fields = field_set
            .infos()
            .map(|(class_name, info)| {
                Ok(SchemaField {
                    class_name: class_name.into(),
                    field_name: info.name().into(),
                    ty: TypeDescriptor::from_reflection(info.type_reflection())?,
                })
            })
            .collect::<Result<_, WireError>>()?;
        Ok(Self { fields })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read an untagged record.
    pub fn read(reader: &mut dyn Reader) -> Result<Self, WireError> {
        let count = read_len(reader)?;
        let mut fields = Vec::with_capacity(reader.remaining_hint().map_or(0, |rest| count.min(rest)));
        for _ in 0..count {
            fields.push(SchemaField {
                class_name: read_string(reader)?,
                field_name: read_string(reader)?,
                ty: TypeDescriptor::read(reader)?,
            });
        }
        Ok(Self { fields })
    }

    /// Read a record opened by [`Tag::ClassSchema`].
    pub fn read_record(reader: &mut dyn Reader) -> Result<Self, WireError> {
        check_tag(reader, Tag::ClassSchema)?;
        Self::read(reader)
    }

    /// Write an untagged record.
    pub fn write(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_len(writer, self.fields.len())?;
        self.fields.iter().try_for_each(|field| {
            write_str(writer, &field.class_name)?;
            write_str(writer, &field.field_name)?;
            field.ty.write(writer)
        })
    }

    /// Write a record opened by [`Tag::ClassSchema`].
    pub fn write_record(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_tag(writer, Tag::ClassSchema)?;
        self.write(writer)
    }
}

// -----------------------------------------------------------------------------
// Direct encoding

/// Write the untagged schema record of a class straight from its field set.
///
/// Each field's type information comes from its declared type's codec.
pub fn write_schema(field_set: &FieldSet, writer: &mut dyn Writer) -> Result<(), WireError> {
    write_len(writer, field_set.total_len())?;
    field_set.infos().try_for_each(|(class_name, info)| {
        write_str(writer, class_name)?;
        write_str(writer, info.name())?;
        info.type_reflection().serialize_type_info(writer)
    })
}

/// [`write_schema`] opened by [`Tag::ClassSchema`].
pub fn write_schema_record(field_set: &FieldSet, writer: &mut dyn Writer) -> Result<(), WireError> {
    write_tag(writer, Tag::ClassSchema)?;
    write_schema(field_set, writer)
}

/// See [`ClassSchema::read`].
#[inline]
pub fn read_schema(reader: &mut dyn Reader) -> Result<ClassSchema, WireError> {
    ClassSchema::read(reader)
}

/// See [`ClassSchema::read_record`].
#[inline]
pub fn read_schema_record(reader: &mut dyn Reader) -> Result<ClassSchema, WireError> {
    ClassSchema::read_record(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;
    use crate::impls::ReflectBox;

    #[derive(Reflect, Default)]
    struct Body {
        mass: f32,
    }

    #[derive(Reflect, Default)]
    #[reflect(type_name = "SchemaProbe")]
    struct Probe {
        #[reflect(base)]
        body: Body,
        id: u8,
        grid: [[bool; 2]; 3],
        payload: ReflectBox,
        unit: (),
    }

    #[test]
    fn record_bytes() {
        let mut bytes = Vec::new();
        write_schema(Body::field_set(), &mut bytes).unwrap();
        assert_eq!(bytes, [0x01, 0x04, b'B', b'o', b'd', b'y', 0x04, b'm', b'a', b's', b's', 0x05]);
    }

    #[test]
    fn direct_and_built_schemas_agree() {
        let mut bytes = Vec::new();
        write_schema_record(Probe::field_set(), &mut bytes).unwrap();

        let mut reader = bytes.as_slice();
        let schema = read_schema_record(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(schema, ClassSchema::of::<Probe>().unwrap());

        let described: Vec<_> = schema
            .fields
            .iter()
            .map(|field| (field.class_name.as_str(), field.field_name.as_str(), field.ty.to_string()))
            .collect();
        assert_eq!(
            described,
            [
                ("SchemaProbe", "id", String::from("Char")),
                ("SchemaProbe", "grid", String::from("FixedArray<FixedArray<Bool; 2>; 3>")),
                ("SchemaProbe", "payload", String::from("Class<ReflectBox>")),
                ("SchemaProbe", "unit", String::from("Void")),
                ("Body", "mass", String::from("Real32")),
            ]
        );
    }

    #[test]
    fn untagged_read_rejects_tagged_input() {
        let mut bytes = Vec::new();
        write_schema(Body::field_set(), &mut bytes).unwrap();
        let err = read_schema_record(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::IncorrectType { found: 0x01, expected: 0x0D }));
    }

    #[test]
    fn descriptor_depth_limit() {
        let bytes = vec![Tag::TypedArray.as_u8(); MAX_DEPTH + 1];
        let err = TypeDescriptor::read(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::NestingTooDeep { limit: MAX_DEPTH }));

        let err = TypeDescriptor::read(&mut [0x0Du8].as_slice()).unwrap_err();
        assert!(matches!(err, WireError::Unsupported(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_form() {
        let schema = ClassSchema::of::<Body>().unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(
            json,
            r#"{"fields":[{"class_name":"Body","field_name":"mass","ty":"Real32"}]}"#
        );
        let back: ClassSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
