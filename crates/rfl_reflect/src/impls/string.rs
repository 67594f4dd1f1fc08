use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeReflectionCell;
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection};
use crate::text::TextCodec;
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer, read_string, write_str};

impl Typed for String {
    fn type_reflection() -> &'static TypeReflection {
        static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
        CELL.get_or_init(|| {
            TypeReflection::new::<String>("String", TypeKind::String).with_default::<String>()
        })
    }
}

impl Reflect for String {}

impl WireCodec for String {
    const TAG: Tag = Tag::Utf8;

    #[inline]
    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_str(writer, self)
    }

    #[inline]
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        *self = read_string(reader)?;
        Ok(())
    }
}

impl TextCodec for String {
    #[inline]
    fn write_text(&self, out: &mut String, _: FieldFlags) {
        out.push_str(self);
    }

    #[inline]
    fn parse_text(&mut self, text: &str) -> Result<(), WireError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn decode_replaces_contents() {
        let mut bytes = Vec::new();
        String::from("new").encode(&mut bytes).unwrap();
        assert_eq!(bytes, [3, b'n', b'e', b'w']);

        let mut value = String::from("old contents");
        value.decode(&mut bytes.as_slice()).unwrap();
        assert_eq!(value, "new");
    }

    #[test]
    fn failed_decode_keeps_value() {
        let mut value = String::from("kept");
        let err = value.decode(&mut [5u8, b'a'].as_slice()).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { needed: 4 }));
        assert_eq!(value, "kept");
    }

    #[test]
    fn text_is_verbatim() {
        let mut value = String::new();
        value.parse_text("  spaced  ").unwrap();
        assert_eq!(value, "  spaced  ");

        let mut out = String::from(">");
        value.write_text(&mut out, FieldFlags::all());
        assert_eq!(out, ">  spaced  ");
    }
}
