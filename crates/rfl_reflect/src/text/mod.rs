//! Human-readable conversion of reflected values.
//!
//! | kind                | text                                  |
//! |---------------------|---------------------------------------|
//! | scalars             | `Display` / `FromStr`                 |
//! | `String`            | the string itself                     |
//! | sequences, arrays   | `[a, b, c]`                           |
//! | classes             | `{name = value, ...}`                 |
//! | `()`                | `()`                                  |
//!
//! Class text only includes fields whose [`FieldFlags`] intersect the mask.
//! Parsing is supported for scalars and strings.

use alloc::string::String;

use crate::Reflect;
use crate::access::ReflectedFields;
use crate::info::{FieldFlags, FieldSet};
use crate::wire::WireError;

/// Text conversion of one type.
pub trait TextCodec {
    /// Append the text form of `self` to `out`.
    fn write_text(&self, out: &mut String, mask: FieldFlags);

    /// Replace `self` with the value parsed from `text`.
    fn parse_text(&mut self, text: &str) -> Result<(), WireError> {
        let _ = text;
        Err(WireError::unsupported("text parsing is not supported for this type"))
    }
}

/// `{name = value, ...}` over the flattened fields of `value`.
pub fn write_class_text(
    value: &dyn Reflect,
    field_set: &'static FieldSet,
    out: &mut String,
    mask: FieldFlags,
) {
    out.push('{');
    let mut first = true;
    for field in ReflectedFields::new(value, field_set).iter() {
        if !field.flags().intersects(mask) {
            continue;
        }
        if !first {
            out.push_str(", ");
        }
        first = false;
        out.push_str(field.name());
        out.push_str(" = ");
        field.write_text(out, mask);
    }
    out.push('}');
}

/// `[a, b, c]` over `items`.
pub fn write_sequence_text<'a, T: TextCodec + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    out: &mut String,
    mask: FieldFlags,
) {
    out.push('[');
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        item.write_text(out, mask);
    }
    out.push(']');
}
