use alloc::string::String;
use core::fmt::Write;

use crate::Reflect;
use crate::impls::NonGenericTypeReflectionCell;
use crate::info::{FieldFlags, Typed};
use crate::registry::{TypeKind, TypeReflection};
use crate::text::TextCodec;
use crate::wire::{Reader, Tag, WireCodec, WireError, Writer, read_smv, write_smv};

/// `Typed`, `Reflect` and `TextCodec` for a `Display + FromStr` scalar.
macro_rules! impl_reflect_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_reflection() -> &'static TypeReflection {
                static CELL: NonGenericTypeReflectionCell = NonGenericTypeReflectionCell::new();
                CELL.get_or_init(|| {
                    TypeReflection::new::<$ty>(stringify!($ty), TypeKind::Scalar)
                        .with_default::<$ty>()
                })
            }
        }

        impl Reflect for $ty {}

        impl TextCodec for $ty {
            #[inline]
            fn write_text(&self, out: &mut String, _: FieldFlags) {
                let _ = write!(out, "{self}");
            }

            fn parse_text(&mut self, text: &str) -> Result<(), WireError> {
                *self = text
                    .trim()
                    .parse()
                    .map_err(|_| WireError::parse(stringify!($ty), text))?;
                Ok(())
            }
        }
    )*};
}

impl_reflect_scalar!(bool, u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

// -----------------------------------------------------------------------------
// Wire codecs

impl WireCodec for bool {
    const TAG: Tag = Tag::Bool;

    #[inline]
    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        writer.write_u8(u8::from(*self))
    }

    /// Any non-zero byte decodes as `true`.
    #[inline]
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        *self = reader.read_u8()? != 0;
        Ok(())
    }
}

impl WireCodec for u8 {
    const TAG: Tag = Tag::Char;

    #[inline]
    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        writer.write_u8(*self)
    }

    #[inline]
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        *self = reader.read_u8()?;
        Ok(())
    }
}

impl WireCodec for i8 {
    const TAG: Tag = Tag::Char;

    #[inline]
    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        writer.write(&self.to_ne_bytes())
    }

    #[inline]
    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        *self = i8::from_ne_bytes([reader.read_u8()?]);
        Ok(())
    }
}

macro_rules! impl_smv_codec {
    ($($ty:ty),*) => {$(
        impl WireCodec for $ty {
            const TAG: Tag = Tag::SmvInt;

            #[inline]
            fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
                write_smv(writer, *self)
            }

            #[inline]
            fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
                *self = read_smv(reader)?;
                Ok(())
            }
        }
    )*};
}

impl_smv_codec!(u16, i16, u32, i32, u64, i64, usize, isize);

macro_rules! impl_float_codec {
    ($($ty:ty => $tag:ident),*) => {$(
        /// Raw IEEE-754 bytes in native byte order.
        impl WireCodec for $ty {
            const TAG: Tag = Tag::$tag;

            #[inline]
            fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
                writer.write(&self.to_ne_bytes())
            }

            #[inline]
            fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
                let mut bytes = [0u8; size_of::<$ty>()];
                reader.read(&mut bytes)?;
                *self = <$ty>::from_ne_bytes(bytes);
                Ok(())
            }
        }
    )*};
}

impl_float_codec!(f32 => Real32, f64 => Real64);

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn encode<T: WireCodec>(value: &T) -> Vec<u8> {
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();
        bytes
    }

    fn decode<T: WireCodec + Default>(bytes: &[u8]) -> Result<T, WireError> {
        let mut value = T::default();
        let mut reader = bytes;
        value.decode(&mut reader)?;
        assert!(reader.is_empty());
        Ok(value)
    }

    #[test]
    fn bool_is_normalized() {
        assert_eq!(encode(&true), [1]);
        assert_eq!(encode(&false), [0]);
        assert!(decode::<bool>(&[0x7F]).unwrap());
        assert!(!decode::<bool>(&[0]).unwrap());
    }

    #[test]
    fn bytes_round_trip() {
        for value in [0u8, 1, 0x7F, 0x80, 0xFF] {
            assert_eq!(decode::<u8>(&encode(&value)).unwrap(), value);
        }
        for value in [i8::MIN, -1, 0, 1, i8::MAX] {
            assert_eq!(encode(&value).len(), 1);
            assert_eq!(decode::<i8>(&encode(&value)).unwrap(), value);
        }
    }

    #[test]
    fn integer_extremes_round_trip() {
        assert_eq!(decode::<i16>(&encode(&i16::MIN)).unwrap(), i16::MIN);
        assert_eq!(decode::<i32>(&encode(&i32::MAX)).unwrap(), i32::MAX);
        assert_eq!(decode::<i64>(&encode(&i64::MIN)).unwrap(), i64::MIN);
        assert_eq!(decode::<u64>(&encode(&u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(decode::<usize>(&encode(&0usize)).unwrap(), 0);
    }

    #[test]
    fn floats_are_raw() {
        let bytes = encode(&1.5f32);
        assert_eq!(bytes, 1.5f32.to_ne_bytes());
        assert_eq!(decode::<f32>(&bytes).unwrap(), 1.5);

        let bytes = encode(&-0.1f64);
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode::<f64>(&bytes).unwrap(), -0.1);

        let nan = decode::<f64>(&encode(&f64::NAN)).unwrap();
        assert!(nan.is_nan());
    }

    #[test]
    fn short_float_read() {
        let err = decode::<f64>(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { needed: 5 }));
    }

    #[test]
    fn text() {
        let mut out = String::new();
        (-42i32).write_text(&mut out, FieldFlags::all());
        assert_eq!(out, "-42");

        let mut value = 0u16;
        value.parse_text(" 512 ").unwrap();
        assert_eq!(value, 512);

        let err = value.parse_text("70000").unwrap_err();
        assert!(matches!(err, WireError::Parse { type_name: "u16", .. }));

        let mut flag = false;
        flag.parse_text("true").unwrap();
        assert!(flag);
    }

    #[test]
    fn reflections() {
        assert_eq!(i32::type_reflection().tag(), Tag::SmvInt);
        assert_eq!(u8::type_reflection().tag(), Tag::Char);
        assert_eq!(f64::type_reflection().tag(), Tag::Real64);
        assert_eq!(bool::type_reflection().name(), "bool");
        assert_eq!(usize::type_reflection().kind(), TypeKind::Scalar);
    }
}
