use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeReflectionCell, concat, leak_name};
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection, TypeRegistry};
use crate::text::{TextCodec, write_sequence_text};
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer, read_len, write_len, write_tag};

pub(super) fn register_element<T: Typed>(registry: &mut TypeRegistry) {
    registry.register::<T>();
}

impl<T> Typed for Vec<T>
where
    T: Reflect + Typed + WireCodec + TextCodec + Default,
{
    fn type_reflection() -> &'static TypeReflection {
        static CELL: GenericTypeReflectionCell = GenericTypeReflectionCell::new();
        CELL.get_or_insert::<Self>(|| {
            let name = concat(&["Vec<", T::type_reflection().name(), ">"]);
            TypeReflection::new::<Self>(leak_name(name), TypeKind::Sequence)
                .with_default::<Self>()
                .with_dependencies(register_element::<T>)
        })
    }
}

impl<T> Reflect for Vec<T> where T: Reflect + Typed + WireCodec + TextCodec + Default {}

/// Element count, then each element's payload. No per-element tag.
impl<T> WireCodec for Vec<T>
where
    T: Reflect + Typed + WireCodec + TextCodec + Default,
{
    const TAG: Tag = Tag::TypedArray;

    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_len(writer, self.len())?;
        self.iter().try_for_each(|item| item.encode(writer))
    }

    /// Replaces the contents. On failure the elements decoded so far are
    /// kept and the failing one is dropped.
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        let len = read_len(reader)?;
        self.clear();
        // Without a size hint the count is untrusted; grow as elements arrive.
        self.reserve(reader.remaining_hint().map_or(0, |remaining| len.min(remaining)));

        for _ in 0..len {
            let mut item = T::default();
            item.decode(reader)?;
            self.push(item);
        }
        Ok(())
    }

    fn encode_type_info(writer: &mut dyn Writer) -> Result<(), WireError> {
        write_tag(writer, Tag::TypedArray)?;
        T::encode_type_info(writer)
    }
}

impl<T> TextCodec for Vec<T>
where
    T: Reflect + Typed + WireCodec + TextCodec + Default,
{
    #[inline]
    fn write_text(&self, out: &mut String, mask: FieldFlags) {
        write_sequence_text(self, out, mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::IoReader;

    #[test]
    fn empty_is_one_byte() {
        let mut bytes = Vec::new();
        Vec::<i32>::new().encode(&mut bytes).unwrap();
        assert_eq!(bytes, [0x00]);

        let mut value = vec![1, 2, 3];
        value.decode(&mut bytes.as_slice()).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn nested_round_trip() {
        let value = vec![vec![String::from("a")], vec![], vec![String::from("bc"), String::new()]];
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();

        let mut decoded = Vec::<Vec<String>>::new();
        let mut reader = bytes.as_slice();
        decoded.decode(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded, value);
    }

    #[test]
    fn corrupted_element_keeps_prefix() {
        // Three i16 elements, the last one out of range.
        let bytes = [0x03, 0x05, 0x41, 0xFF, 0xFF, 0x03];
        let mut value = vec![9i16; 8];
        let err = value.decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::IntegerOverflow { type_name: "i16" }));
        assert_eq!(value, [5, -1]);
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let mut bytes = Vec::new();
        write_len(&mut bytes, usize::MAX >> 8).unwrap();
        let mut value = Vec::<u8>::new();
        let err = value.decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { .. }));
        assert!(value.capacity() < 64);
    }

    #[test]
    fn huge_count_without_size_hint() {
        let mut bytes = Vec::new();
        write_len(&mut bytes, usize::MAX >> 8).unwrap();
        bytes.push(0x07);

        let mut value = Vec::<u64>::new();
        let mut reader = IoReader(std::io::Cursor::new(bytes));
        let err = value.decode(&mut reader).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { .. }));
        assert_eq!(value, [7]);
        assert!(value.capacity() < 64);
    }

    #[test]
    fn type_info_and_text() {
        let mut bytes = Vec::new();
        <Vec<Vec<f32>>>::encode_type_info(&mut bytes).unwrap();
        assert_eq!(bytes, [0x09, 0x09, 0x05]);

        let mut out = String::new();
        vec![1.5f64, -2.0].write_text(&mut out, FieldFlags::all());
        assert_eq!(out, "[1.5, -2]");

        let reflection = <Vec<Vec<u8>>>::type_reflection();
        assert_eq!(reflection.name(), "Vec<Vec<u8>>");
        assert!(core::ptr::eq(reflection, <Vec<Vec<u8>>>::type_reflection()));
    }
}
