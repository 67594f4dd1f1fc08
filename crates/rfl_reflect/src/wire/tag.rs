use core::fmt;

use super::{Reader, WireError, Writer};

/// One-byte discriminator describing the shape of the value that follows.
///
/// The set is closed; any other byte is a decode error.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    NoType = 0x00,
    Void = 0x01,
    Bool = 0x02,
    Char = 0x03,
    SmvInt = 0x04,
    Real32 = 0x05,
    Real64 = 0x06,
    Utf8 = 0x08,
    TypedArray = 0x09,
    FixedArray = 0x0A,
    Class = 0x0C,
    ClassSchema = 0x0D,
}

impl Tag {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(byte: u8) -> Option<Tag> {
        Some(match byte {
            0x00 => Tag::NoType,
            0x01 => Tag::Void,
            0x02 => Tag::Bool,
            0x03 => Tag::Char,
            0x04 => Tag::SmvInt,
            0x05 => Tag::Real32,
            0x06 => Tag::Real64,
            0x08 => Tag::Utf8,
            0x09 => Tag::TypedArray,
            0x0A => Tag::FixedArray,
            0x0C => Tag::Class,
            0x0D => Tag::ClassSchema,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::NoType => "NoType",
            Tag::Void => "Void",
            Tag::Bool => "Bool",
            Tag::Char => "Char",
            Tag::SmvInt => "SmvInt",
            Tag::Real32 => "Real32",
            Tag::Real64 => "Real64",
            Tag::Utf8 => "Utf8",
            Tag::TypedArray => "TypedArray",
            Tag::FixedArray => "FixedArray",
            Tag::Class => "Class",
            Tag::ClassSchema => "ClassSchema",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Tag::from_u8(byte).ok_or_else(|| WireError::unknown_tag(byte))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), self.as_u8())
    }
}

/// Write a single tag byte.
#[inline]
pub fn write_tag(writer: &mut dyn Writer, tag: Tag) -> Result<(), WireError> {
    writer.write_u8(tag.as_u8())
}

/// Read one tag byte and decode it.
pub fn read_tag(reader: &mut dyn Reader) -> Result<Tag, WireError> {
    Tag::try_from(reader.read_u8()?)
}

/// Read one byte and require it to equal `expected`.
///
/// Consumes exactly one byte on success and on mismatch.
pub fn check_tag(reader: &mut dyn Reader, expected: Tag) -> Result<(), WireError> {
    let found = reader.read_u8()?;
    if found == expected.as_u8() {
        Ok(())
    } else {
        Err(WireError::incorrect_type(found, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ErrorKind;

    #[test]
    fn byte_values() {
        let expected = [
            (Tag::NoType, 0x00),
            (Tag::Void, 0x01),
            (Tag::Bool, 0x02),
            (Tag::Char, 0x03),
            (Tag::SmvInt, 0x04),
            (Tag::Real32, 0x05),
            (Tag::Real64, 0x06),
            (Tag::Utf8, 0x08),
            (Tag::TypedArray, 0x09),
            (Tag::FixedArray, 0x0A),
            (Tag::Class, 0x0C),
            (Tag::ClassSchema, 0x0D),
        ];
        for (tag, byte) in expected {
            assert_eq!(tag.as_u8(), byte);
            assert_eq!(Tag::from_u8(byte), Some(tag));
        }
        assert_eq!(Tag::from_u8(0x07), None);
        assert_eq!(Tag::from_u8(0x0B), None);
    }

    #[test]
    fn check_tag_mismatch_consumes_one_byte() {
        let bytes = [0x02u8, 0x01];
        let mut reader: &[u8] = &bytes;
        let err = check_tag(&mut reader, Tag::SmvInt).unwrap_err();
        assert!(matches!(
            err,
            WireError::IncorrectType {
                found: 0x02,
                expected: 0x04
            }
        ));
        assert_eq!(reader, [0x01u8].as_slice());
    }

    #[test]
    fn read_unknown_tag() {
        let mut reader: &[u8] = &[0x0E];
        let err = read_tag(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTag);
    }

    #[test]
    fn display() {
        assert_eq!(Tag::FixedArray.to_string(), "FixedArray(0x0A)");
    }
}
