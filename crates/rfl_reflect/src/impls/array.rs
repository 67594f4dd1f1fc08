use alloc::string::String;

use crate::Reflect;
use crate::impls::sequence::register_element;
use crate::impls::{GenericTypeReflectionCell, concat, leak_name};
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection};
use crate::text::{TextCodec, write_sequence_text};
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer, read_len, write_len, write_tag};

impl<T, const N: usize> Typed for [T; N]
where
    T: Reflect + Typed + WireCodec + TextCodec,
{
    fn type_reflection() -> &'static TypeReflection {
        static CELL: GenericTypeReflectionCell = GenericTypeReflectionCell::new();
        CELL.get_or_insert::<Self>(|| {
            let len = N.to_string();
            let name = concat(&["[", T::type_reflection().name(), "; ", &len, "]"]);
            TypeReflection::new::<Self>(leak_name(name), TypeKind::FixedArray)
                .with_dependencies(register_element::<T>)
        })
    }
}

impl<T, const N: usize> Reflect for [T; N] where T: Reflect + Typed + WireCodec + TextCodec {}

/// Same payload as a sequence; the decoded length must equal `N`.
impl<T, const N: usize> WireCodec for [T; N]
where
    T: Reflect + Typed + WireCodec + TextCodec,
{
    const TAG: Tag = Tag::FixedArray;

    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_len(writer, N)?;
        self.iter().try_for_each(|item| item.encode(writer))
    }

    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        let len = read_len(reader)?;
        if len != N {
            return Err(WireError::length_mismatch(N as u64, len as u64));
        }
        self.iter_mut().try_for_each(|item| item.decode(reader))
    }

    fn encode_type_info(writer: &mut dyn Writer) -> Result<(), WireError> {
        write_tag(writer, Tag::FixedArray)?;
        write_len(writer, N)?;
        T::encode_type_info(writer)
    }
}

impl<T, const N: usize> TextCodec for [T; N]
where
    T: Reflect + Typed + WireCodec + TextCodec,
{
    #[inline]
    fn write_text(&self, out: &mut String, mask: FieldFlags) {
        write_sequence_text(self, out, mask);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn round_trip() {
        let value = [[1i32, -2], [i32::MIN, i32::MAX]];
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();

        let mut decoded = [[0i32; 2]; 2];
        decoded.decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn length_mismatch() {
        let mut bytes = Vec::new();
        [1u8, 2, 3].encode(&mut bytes).unwrap();

        let mut value = [0u8; 2];
        let err = value.decode(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::LengthMismatch { expected: 2, found: 3 }));
        assert_eq!(value, [0, 0]);
    }

    #[test]
    fn reflection() {
        let reflection = <[f32; 3]>::type_reflection();
        assert_eq!(reflection.name(), "[f32; 3]");
        assert_eq!(reflection.kind(), TypeKind::FixedArray);
        assert!(!reflection.has_default());

        let mut bytes = Vec::new();
        reflection.serialize_type_info(&mut bytes).unwrap();
        assert_eq!(bytes, [0x0A, 0x03, 0x05]);
    }
}
