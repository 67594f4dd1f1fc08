use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use super::Tag;

/// Failures raised while encoding or decoding the wire format.
///
/// Construct values through the associated functions (`WireError::incorrect_type`,
/// `WireError::unexpected_eof`, ...) rather than the variants directly; they keep
/// the error paths out of line.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WireError {
    /// A tag byte different from the expected one was read.
    #[error("Unexpected tag 0x{found:02X}, expected 0x{expected:02X}.")]
    IncorrectType { found: u8, expected: u8 },

    /// A tag byte outside the known tag set was read.
    #[error("Unknown tag 0x{0:02X}.")]
    UnknownTag(u8),

    /// The stream ended before `needed` more bytes could be read.
    #[error("Unexpected end of stream, {needed} more byte(s) required.")]
    UnexpectedEof { needed: usize },

    /// The sink accepted fewer bytes than requested.
    #[error("Short write, {available} of {len} byte(s) accepted.")]
    ShortWrite { available: usize, len: usize },

    /// Failure of an underlying [`std::io`] stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A variable-length integer ran past the longest valid encoding.
    #[error("Variable-length integer exceeds the longest valid encoding.")]
    SmvIntTooLong,

    /// A decoded integer does not fit the destination type.
    #[error("Decoded integer does not fit in `{type_name}`.")]
    IntegerOverflow { type_name: &'static str },

    /// A string payload is not valid UTF-8.
    #[error("String payload is not valid UTF-8.")]
    InvalidUtf8,

    /// A fixed-size sequence was encoded with a different length.
    #[error("Length mismatch, expected {expected} but found {found}.")]
    LengthMismatch { expected: u64, found: u64 },

    /// Nested values exceed the decoder's depth limit.
    #[error("Input nested deeper than {limit} level(s).")]
    NestingTooDeep { limit: usize },

    /// A polymorphic value names a type that cannot be instantiated.
    #[error("Type `{0}` is not registered or cannot be default-constructed.")]
    UnknownType(Cow<'static, str>),

    /// Text could not be parsed into the destination type.
    #[error("Cannot parse `{input}` as `{type_name}`.")]
    Parse { type_name: &'static str, input: String },

    /// The operation is not available for this type or input.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),
}

impl WireError {
    #[cold]
    #[inline(never)]
    pub fn incorrect_type(found: u8, expected: Tag) -> Self {
        WireError::IncorrectType {
            found,
            expected: expected.as_u8(),
        }
    }

    #[cold]
    #[inline(never)]
    pub fn unknown_tag(tag: u8) -> Self {
        WireError::UnknownTag(tag)
    }

    #[cold]
    #[inline(never)]
    pub fn unexpected_eof(needed: usize) -> Self {
        WireError::UnexpectedEof { needed }
    }

    #[cold]
    #[inline(never)]
    pub fn short_write(available: usize, len: usize) -> Self {
        WireError::ShortWrite { available, len }
    }

    #[cold]
    #[inline(never)]
    pub fn smv_int_too_long() -> Self {
        WireError::SmvIntTooLong
    }

    #[cold]
    #[inline(never)]
    pub fn integer_overflow(type_name: &'static str) -> Self {
        WireError::IntegerOverflow { type_name }
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_utf8() -> Self {
        WireError::InvalidUtf8
    }

    #[cold]
    #[inline(never)]
    pub fn length_mismatch(expected: u64, found: u64) -> Self {
        WireError::LengthMismatch { expected, found }
    }

    #[cold]
    #[inline(never)]
    pub fn nesting_too_deep(limit: usize) -> Self {
        WireError::NestingTooDeep { limit }
    }

    #[cold]
    #[inline(never)]
    pub fn unknown_type<S: Into<Cow<'static, str>>>(name: S) -> Self {
        WireError::UnknownType(name.into())
    }

    #[cold]
    #[inline(never)]
    pub fn parse<S: Into<String>>(type_name: &'static str, input: S) -> Self {
        WireError::Parse {
            type_name,
            input: input.into(),
        }
    }

    #[cold]
    #[inline(never)]
    pub fn unsupported<S: Into<Cow<'static, str>>>(message: S) -> Self {
        WireError::Unsupported(message.into())
    }

    /// The named category this error is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WireError::IncorrectType { .. } => ErrorKind::IncorrectType,
            WireError::UnknownTag(_) => ErrorKind::UnknownTag,
            WireError::UnexpectedEof { .. } => ErrorKind::ShortRead,
            WireError::ShortWrite { .. } => ErrorKind::ShortWrite,
            WireError::Io(err) => match err.kind() {
                std::io::ErrorKind::UnexpectedEof => ErrorKind::ShortRead,
                std::io::ErrorKind::WriteZero => ErrorKind::ShortWrite,
                _ => ErrorKind::Io,
            },
            WireError::SmvIntTooLong | WireError::IntegerOverflow { .. } => ErrorKind::Overflow,
            WireError::InvalidUtf8
            | WireError::LengthMismatch { .. }
            | WireError::NestingTooDeep { .. } => ErrorKind::InvalidData,
            WireError::UnknownType(_) => ErrorKind::UnknownType,
            WireError::Parse { .. } => ErrorKind::Parse,
            WireError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}

/// Named error category handed to an [`ErrorHandler`](super::ErrorHandler).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IncorrectType,
    UnknownTag,
    ShortRead,
    ShortWrite,
    Io,
    Overflow,
    InvalidData,
    UnknownType,
    Parse,
    Unsupported,
}

impl ErrorKind {
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::IncorrectType => "IncorrectType",
            ErrorKind::UnknownTag => "UnknownTag",
            ErrorKind::ShortRead => "ShortRead",
            ErrorKind::ShortWrite => "ShortWrite",
            ErrorKind::Io => "Io",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::InvalidData => "InvalidData",
            ErrorKind::UnknownType => "UnknownType",
            ErrorKind::Parse => "Parse",
            ErrorKind::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incorrect_type_message() {
        let err = WireError::incorrect_type(0x02, Tag::SmvInt);
        assert_eq!(err.kind(), ErrorKind::IncorrectType);
        assert_eq!(err.to_string(), "Unexpected tag 0x02, expected 0x04.");
    }

    #[test]
    fn io_kinds_map_to_short_read_and_write() {
        let eof = WireError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        let zero = WireError::from(std::io::Error::from(std::io::ErrorKind::WriteZero));
        let other = WireError::from(std::io::Error::other("boom"));
        assert_eq!(eof.kind(), ErrorKind::ShortRead);
        assert_eq!(zero.kind(), ErrorKind::ShortWrite);
        assert_eq!(other.kind(), ErrorKind::Io);
    }

    #[test]
    fn kind_names() {
        assert_eq!(WireError::smv_int_too_long().kind().name(), "Overflow");
        assert_eq!(WireError::unexpected_eof(3).kind().to_string(), "ShortRead");
    }
}
