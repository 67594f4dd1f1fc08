//! Caller-facing entry points.
//!
//! Every fallible function here reports its failure once to the process-wide
//! [`ErrorHandler`](crate::wire::ErrorHandler) and then returns it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::access::{ReflectedFields, ReflectedFieldsMut};
use crate::info::{Class, FieldFlags, FieldInfo, Typed};
use crate::registry::TypeRegistry;
use crate::wire::schema::{read_schema_record, write_schema_record};
use crate::wire::{ClassSchema, Reader, WireError, Writer};
use crate::wire::{check_tag, error_handler, report_with, write_tag};

#[inline]
fn report<T>(result: Result<T, WireError>) -> Result<T, WireError> {
    if result.is_ok() {
        return result;
    }
    report_with(&*error_handler(), result)
}

// -----------------------------------------------------------------------------
// Binary

/// Encode `value` without a leading tag.
pub fn reflect_serialize<T: Reflect + Typed>(
    value: &T,
    writer: &mut dyn Writer,
) -> Result<(), WireError> {
    reflect_serialize_dyn(value, writer)
}

/// Decode into `value` in place, without expecting a leading tag.
pub fn reflect_deserialize<T: Reflect + Typed>(
    value: &mut T,
    reader: &mut dyn Reader,
) -> Result<(), WireError> {
    reflect_deserialize_dyn(value, reader)
}

/// [`reflect_serialize`] through the value's runtime type.
pub fn reflect_serialize_dyn(value: &dyn Reflect, writer: &mut dyn Writer) -> Result<(), WireError> {
    report(value.reflect_type_reflection().serialize(value, writer))
}

/// [`reflect_deserialize`] through the value's runtime type.
pub fn reflect_deserialize_dyn(
    value: &mut dyn Reflect,
    reader: &mut dyn Reader,
) -> Result<(), WireError> {
    let reflection = value.reflect_type_reflection();
    report(reflection.deserialize(value, reader))
}

/// Encode the type's tag, then `value`.
pub fn reflect_serialize_tagged<T: Reflect + Typed>(
    value: &T,
    writer: &mut dyn Writer,
) -> Result<(), WireError> {
    let reflection = T::type_reflection();
    report(write_tag(writer, reflection.tag()).and_then(|()| reflection.serialize(value, writer)))
}

/// Require the type's tag, then decode into `value`.
///
/// On a tag mismatch exactly one byte has been consumed and `value` is
/// untouched.
///
/// ```
/// use rfl_reflect::api;
/// use rfl_reflect::wire::{ErrorKind, Tag};
///
/// let mut bytes = Vec::new();
/// api::reflect_serialize_tagged(&String::from("text"), &mut bytes).unwrap();
/// assert_eq!(bytes[0], Tag::Utf8.as_u8());
///
/// let mut number = 0i32;
/// let mut reader = bytes.as_slice();
/// let err = api::reflect_deserialize_tagged(&mut number, &mut reader).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::IncorrectType);
/// assert_eq!(reader.len(), bytes.len() - 1);
/// ```
pub fn reflect_deserialize_tagged<T: Reflect + Typed>(
    value: &mut T,
    reader: &mut dyn Reader,
) -> Result<(), WireError> {
    let reflection = T::type_reflection();
    report(check_tag(reader, reflection.tag()).and_then(|()| reflection.deserialize(value, reader)))
}

// -----------------------------------------------------------------------------
// Fields

/// Flattened read-only view over the fields of `value`.
#[inline]
pub fn reflect_fields<T: Class>(value: &T) -> ReflectedFields<'_> {
    ReflectedFields::new(value, T::field_set())
}

/// Flattened mutable view over the fields of `value`.
#[inline]
pub fn reflect_fields_mut<T: Class>(value: &mut T) -> ReflectedFieldsMut<'_> {
    ReflectedFieldsMut::new(value, T::field_set())
}

/// Flattened view over any value, `None` if it is not a class instance.
#[inline]
pub fn reflect_fields_dyn(value: &dyn Reflect) -> Option<ReflectedFields<'_>> {
    ReflectedFields::of(value)
}

/// Field metadata of `T` without an instance, as `(declaring class, field)`
/// in flattened order.
pub fn reflect_fields_static<T: Class>()
-> impl ExactSizeIterator<Item = (&'static str, &'static FieldInfo)> {
    let infos: Vec<_> = T::field_set().infos().collect();
    infos.into_iter()
}

// -----------------------------------------------------------------------------
// Names

/// Class name of the value, resolving polymorphic holders to the held value.
#[inline]
pub fn reflect_class_name(value: &dyn Reflect) -> &'static str {
    value.reflect_type_name()
}

/// Type name of `value`, dynamic for polymorphic holders.
#[inline]
pub fn reflect_type_name<T: Reflect + Typed>(value: &T) -> &'static str {
    T::type_reflection().type_name(value)
}

#[inline]
pub fn reflect_static_type_name<T: Typed>() -> &'static str {
    T::type_reflection().name()
}

// -----------------------------------------------------------------------------
// Text

/// Text form of `value`. Class fields are included when their flags
/// intersect `mask`.
pub fn reflect_to_string(value: &dyn Reflect, mask: FieldFlags) -> String {
    value.reflect_type_reflection().to_text(value, mask)
}

/// Parse `text` into `value`.
pub fn reflect_from_string(value: &mut dyn Reflect, text: &str) -> Result<(), WireError> {
    let reflection = value.reflect_type_reflection();
    report(reflection.parse_text(value, text))
}

/// One line per field of `value` whose flags intersect `mask`:
/// `<type> <Class>::<field> = <text>`.
///
/// Polymorphic fields show the held type followed by the declared one in
/// parentheses. A value that is not a class yields a single line
/// `<type> = <text>`. Every line is also emitted through [`log::debug!`].
///
/// ```
/// use rfl_reflect::{api, derive::Reflect, info::FieldFlags};
///
/// #[derive(Reflect, Default)]
/// struct Config {
///     #[reflect(config)]
///     retries: u8,
///     cache: Vec<u16>,
/// }
///
/// let config = Config { retries: 3, cache: vec![1, 2] };
/// assert_eq!(
///     api::reflect_dump(&config, FieldFlags::DEFAULT_TEXT),
///     ["u8 Config::retries = 3", "Vec<u16> Config::cache = [1, 2]"],
/// );
/// assert_eq!(api::reflect_dump(&config, FieldFlags::CONFIG).len(), 1);
/// ```
pub fn reflect_dump(value: &dyn Reflect, mask: FieldFlags) -> Vec<String> {
    let lines: Vec<String> = match ReflectedFields::of(value) {
        Some(fields) => fields
            .iter()
            .filter(|field| field.flags().intersects(mask))
            .map(|field| {
                let text = field.to_text(mask);
                if field.is_polymorphic() {
                    alloc::format!(
                        "{} ({}) {}::{} = {text}",
                        field.type_name(),
                        field.static_type_name(),
                        field.class_name(),
                        field.name(),
                    )
                } else {
                    alloc::format!(
                        "{} {}::{} = {text}",
                        field.type_name(),
                        field.class_name(),
                        field.name(),
                    )
                }
            })
            .collect(),
        None => alloc::vec![alloc::format!(
            "{} = {}",
            value.reflect_type_name(),
            reflect_to_string(value, mask)
        )],
    };

    for line in &lines {
        log::debug!("{line}");
    }
    lines
}

// -----------------------------------------------------------------------------
// Schema

/// Write the schema record of `T`, opened by
/// [`Tag::ClassSchema`](crate::wire::Tag::ClassSchema).
pub fn reflect_schema<T: Class>(writer: &mut dyn Writer) -> Result<(), WireError> {
    report(write_schema_record(T::field_set(), writer))
}

/// Read a schema record written by [`reflect_schema`].
pub fn reflect_read_schema(reader: &mut dyn Reader) -> Result<ClassSchema, WireError> {
    report(read_schema_record(reader))
}

// -----------------------------------------------------------------------------
// Registration

/// Register `T` and its dependencies in [`TypeRegistry::global`], making it
/// resolvable by name when decoding polymorphic values.
pub fn register<T: Typed>() {
    TypeRegistry::global().write().register::<T>();
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::*;
    use crate::derive::Reflect;
    use crate::impls::ReflectBox;
    use crate::wire::{CollectingErrorHandler, ErrorKind, set_error_handler};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(type_name = "ApiShape")]
    struct Shape {
        #[reflect(config)]
        name: String,
        #[reflect(transient)]
        area: f64,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(type_name = "ApiCircle")]
    struct Circle {
        #[reflect(base)]
        shape: Shape,
        radius: f32,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(type_name = "ApiScene")]
    struct Scene {
        items: Vec<ReflectBox>,
        #[reflect(skip)]
        cached: u32,
    }

    fn circle() -> Circle {
        Circle {
            shape: Shape {
                name: String::from("c"),
                area: 2.5,
            },
            radius: 1.0,
        }
    }

    #[test]
    fn round_trip_through_base_chain() {
        let value = circle();
        let mut bytes = Vec::new();
        reflect_serialize(&value, &mut bytes).unwrap();

        let mut back = Circle::default();
        reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn tagged_round_trip_and_mismatch() {
        let mut bytes = Vec::new();
        reflect_serialize_tagged(&circle(), &mut bytes).unwrap();
        assert_eq!(bytes[0], 0x0C);

        let mut back = Circle::default();
        reflect_deserialize_tagged(&mut back, &mut bytes.as_slice()).unwrap();
        assert_eq!(back, circle());

        let mut number = 5u64;
        let mut reader = bytes.as_slice();
        let err = reflect_deserialize_tagged(&mut number, &mut reader).unwrap_err();
        assert!(matches!(err, WireError::IncorrectType { found: 0x0C, expected: 0x04 }));
        assert_eq!(reader.len(), bytes.len() - 1);
        assert_eq!(number, 5);
    }

    #[test]
    fn empty_sequence() {
        let mut bytes = Vec::new();
        reflect_serialize(&Vec::<String>::new(), &mut bytes).unwrap();
        assert_eq!(bytes, [0x00]);

        let mut back = vec![String::from("stale")];
        reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn corrupted_element_midway() {
        let mut bytes = Vec::new();
        reflect_serialize(&vec![String::from("ok"), String::from("\u{e9}")], &mut bytes).unwrap();
        // Break the second element's UTF-8.
        let last = bytes.len() - 1;
        bytes[last] = 0xFF;

        let mut back = Vec::<String>::new();
        let err = reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(back, ["ok"]);
    }

    #[test]
    fn polymorphic_sequence() {
        register::<Circle>();

        let scene = Scene {
            items: vec![ReflectBox::new(circle()), ReflectBox::new(7i32), ReflectBox::default()],
            cached: 99,
        };
        let mut bytes = Vec::new();
        reflect_serialize(&scene, &mut bytes).unwrap();

        let mut back = Scene::default();
        reflect_deserialize(&mut back, &mut bytes.as_slice()).unwrap();
        assert_eq!(back.cached, 0);
        assert_eq!(back.items.len(), 3);
        assert_eq!(back.items[0].downcast_ref::<Circle>(), Some(&circle()));
        assert_eq!(reflect_type_name(&back.items[0]), "ApiCircle");
        assert_eq!(back.items[1].downcast_ref::<i32>(), Some(&7));
        assert!(back.items[2].is::<()>());
    }

    #[test]
    fn names() {
        let value = circle();
        assert_eq!(reflect_class_name(&value), "ApiCircle");
        assert_eq!(reflect_type_name(&value), "ApiCircle");
        assert_eq!(reflect_static_type_name::<Vec<[u8; 4]>>(), "Vec<[u8; 4]>");
        assert_eq!(reflect_static_type_name::<ReflectBox>(), "ReflectBox");
        assert_eq!(reflect_class_name(&ReflectBox::new(value)), "ApiCircle");
    }

    #[test]
    fn static_fields() {
        let fields: Vec<_> = reflect_fields_static::<Circle>()
            .map(|(class, info)| (class, info.name(), info.flags()))
            .collect();
        assert_eq!(
            fields,
            [
                ("ApiCircle", "radius", FieldFlags::STATE),
                ("ApiShape", "name", FieldFlags::CONFIG),
                ("ApiShape", "area", FieldFlags::TRANSIENT),
            ]
        );
        assert_eq!(reflect_fields_static::<Scene>().len(), 1);
    }

    #[test]
    fn views() {
        let mut value = circle();
        assert_eq!(reflect_fields(&value).count(), 3);
        assert!(reflect_fields_dyn(&value).is_some());
        assert!(reflect_fields_dyn(&1u8).is_none());

        let mut fields = reflect_fields_mut(&mut value);
        fields.at_mut(1).set_from_string("square").unwrap();
        *fields.at_mut(0).downcast_mut::<f32>().unwrap() = 2.0;
        assert_eq!(value.shape.name, "square");
        assert_eq!(value.radius, 2.0);
    }

    #[test]
    fn text() {
        let value = circle();
        assert_eq!(
            reflect_to_string(&value, FieldFlags::DEFAULT_TEXT),
            "{radius = 1, name = c}"
        );
        assert_eq!(
            reflect_to_string(&value, FieldFlags::all()),
            "{radius = 1, name = c, area = 2.5}"
        );

        let mut number = 0i16;
        reflect_from_string(&mut number, "-12").unwrap();
        assert_eq!(number, -12);

        let mut other = circle();
        let err = reflect_from_string(&mut other, "{}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn dump_notes_polymorphic_fields() {
        #[derive(Reflect, Default)]
        #[reflect(type_name = "ApiHolder")]
        struct Holder {
            value: ReflectBox,
        }

        let holder = Holder { value: ReflectBox::new(4u16) };
        assert_eq!(
            reflect_dump(&holder, FieldFlags::DEFAULT_TEXT),
            ["u16 (ReflectBox) ApiHolder::value = 4"]
        );
        assert_eq!(reflect_dump(&true, FieldFlags::DEFAULT_TEXT), ["bool = true"]);
    }

    #[test]
    fn schema_round_trip() {
        let mut bytes = Vec::new();
        reflect_schema::<Circle>(&mut bytes).unwrap();
        let schema = reflect_read_schema(&mut bytes.as_slice()).unwrap();
        assert_eq!(schema, ClassSchema::of::<Circle>().unwrap());
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn failures_reach_the_error_handler() {
        let handler = Arc::new(CollectingErrorHandler::new());
        set_error_handler(Arc::clone(&handler));

        let mut value = 0u32;
        let result = reflect_deserialize(&mut value, &mut [0x80u8].as_slice());
        crate::wire::reset_error_handler();

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShortRead);
        let reports = handler.take();
        assert!(reports.iter().any(|(kind, _)| *kind == ErrorKind::ShortRead));
    }
}
