use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeReflectionCell;
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection};
use crate::text::TextCodec;
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer};

impl Typed for () {
    fn type_reflection() -> &'static TypeReflection {
        static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
        CELL.get_or_init(|| TypeReflection::new::<()>("()", TypeKind::Void).with_default::<()>())
    }
}

impl Reflect for () {}

/// Carries no payload.
impl WireCodec for () {
    const TAG: Tag = Tag::Void;

    #[inline]
    fn encode(&self, _: &mut dyn Writer) -> Result<(), WireError> {
        Ok(())
    }

    #[inline]
    fn decode(&mut self, _: &mut dyn Reader) -> Result<(), WireError> {
        Ok(())
    }
}

impl TextCodec for () {
    #[inline]
    fn write_text(&self, out: &mut String, _: FieldFlags) {
        out.push_str("()");
    }

    fn parse_text(&mut self, text: &str) -> Result<(), WireError> {
        match text.trim() {
            "()" | "" => Ok(()),
            _ => Err(WireError::parse("()", text)),
        }
    }
}
