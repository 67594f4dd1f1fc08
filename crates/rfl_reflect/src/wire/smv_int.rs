//! Sign-magnitude variable-length integers.
//!
//! The magnitude is split into 7-bit groups, least significant first. Every
//! group but the last carries the continuation bit `0x80`. The last group holds
//! at most 6 magnitude bits; its bit `0x40` is the sign.
//!
//! | value | bytes        |
//! |-------|--------------|
//! | `0`   | `00`         |
//! | `-1`  | `41`         |
//! | `63`  | `3F`         |
//! | `64`  | `C0 00`      |
//! | `-64` | `C0 40`      |
//!
//! Encoded length never decreases as the magnitude grows, and every value of a
//! 64-bit or narrower integer fits in [`MAX_SMV_INT_LEN`] bytes.

use super::{Reader, WireError, Writer};

/// The longest valid encoding.
pub const MAX_SMV_INT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const SIGN: u8 = 0x40;

/// Integer types carried as [`Tag::SmvInt`](super::Tag::SmvInt).
pub trait SmvInt: Copy + 'static {
    const TYPE_NAME: &'static str;

    /// Split into `(negative, magnitude)`.
    fn to_sign_magnitude(self) -> (bool, u64);

    /// Rebuild from a decoded sign and magnitude, `None` when out of range.
    fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self>;
}

macro_rules! impl_smv_int {
    (signed: $($ty:ty),*) => {$(
        impl SmvInt for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            #[inline]
            fn to_sign_magnitude(self) -> (bool, u64) {
                (self < 0, self.unsigned_abs() as u64)
            }

            #[inline]
            fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self> {
                let value = i128::try_from(magnitude).ok()?;
                let value = if negative { -value } else { value };
                <$ty>::try_from(value).ok()
            }
        }
    )*};
    (unsigned: $($ty:ty),*) => {$(
        impl SmvInt for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            #[inline]
            fn to_sign_magnitude(self) -> (bool, u64) {
                (false, self as u64)
            }

            #[inline]
            fn from_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self> {
                if negative && magnitude != 0 {
                    return None;
                }
                <$ty>::try_from(magnitude).ok()
            }
        }
    )*};
}

impl_smv_int!(signed: i8, i16, i32, i64, isize);
impl_smv_int!(unsigned: u8, u16, u32, u64, usize);

/// Encode a sign and magnitude into `out`, returning the encoded length.
pub fn encode_sign_magnitude(
    negative: bool,
    magnitude: u64,
    out: &mut [u8; MAX_SMV_INT_LEN],
) -> usize {
    let magnitude = u128::from(magnitude);

    // Smallest sign position strictly above every magnitude bit.
    let mut sign_mask: u128 = SIGN as u128;
    while magnitude & (sign_mask - 1) != magnitude {
        sign_mask <<= 7;
    }

    let mut combined = if negative {
        magnitude | sign_mask
    } else {
        magnitude
    };
    let mut mask = sign_mask | (sign_mask - 1);
    let mut len = 0;

    while mask != 0 {
        let mut byte = (combined & 0x7F) as u8;
        combined >>= 7;
        mask >>= 7;
        if mask != 0 {
            byte |= CONTINUATION;
        }
        out[len] = byte;
        len += 1;
    }

    len
}

/// Number of bytes `value` encodes to.
pub fn encoded_len<T: SmvInt>(value: T) -> usize {
    let (negative, magnitude) = value.to_sign_magnitude();
    encode_sign_magnitude(negative, magnitude, &mut [0; MAX_SMV_INT_LEN])
}

/// Write `value` as a sign-magnitude varint.
pub fn write_smv<T: SmvInt>(writer: &mut dyn Writer, value: T) -> Result<(), WireError> {
    let (negative, magnitude) = value.to_sign_magnitude();
    let mut buf = [0u8; MAX_SMV_INT_LEN];
    let len = encode_sign_magnitude(negative, magnitude, &mut buf);
    writer.write(&buf[..len])
}

/// Read a sign-magnitude varint into `T`.
///
/// Fails with [`WireError::SmvIntTooLong`] past [`MAX_SMV_INT_LEN`] groups and
/// with [`WireError::IntegerOverflow`] when the value does not fit `T`.
pub fn read_smv<T: SmvInt>(reader: &mut dyn Reader) -> Result<T, WireError> {
    let (negative, magnitude) = read_sign_magnitude(reader)?;
    T::from_sign_magnitude(negative, magnitude)
        .ok_or_else(|| WireError::integer_overflow(T::TYPE_NAME))
}

fn read_sign_magnitude(reader: &mut dyn Reader) -> Result<(bool, u128), WireError> {
    let mut magnitude: u128 = 0;
    let mut shift = 0u32;

    for _ in 0..MAX_SMV_INT_LEN {
        let byte = reader.read_u8()?;
        if byte & CONTINUATION != 0 {
            magnitude |= u128::from(byte & 0x7F) << shift;
            shift += 7;
        } else {
            magnitude |= u128::from(byte & (SIGN - 1)) << shift;
            return Ok((byte & SIGN != 0, magnitude));
        }
    }

    Err(WireError::smv_int_too_long())
}

/// Write a length or count prefix.
#[inline]
pub fn write_len(writer: &mut dyn Writer, len: usize) -> Result<(), WireError> {
    write_smv(writer, len)
}

/// Read a length or count prefix.
#[inline]
pub fn read_len(reader: &mut dyn Reader) -> Result<usize, WireError> {
    read_smv::<usize>(reader)
}
