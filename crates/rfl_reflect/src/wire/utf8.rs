use alloc::string::String;
use alloc::vec::Vec;

use super::{Reader, WireError, Writer, read_len, write_len};

/// Upper bound of a single read while decoding a string payload.
const READ_CHUNK: usize = 4096;

/// Write a UTF-8 payload: varint byte length, then the bytes.
pub fn write_str(writer: &mut dyn Writer, text: &str) -> Result<(), WireError> {
    write_len(writer, text.len())?;
    writer.write(text.as_bytes())
}

/// Read a UTF-8 payload written by [`write_str`].
///
/// The declared length is never allocated up front; a corrupted prefix fails
/// with [`WireError::UnexpectedEof`] once the source runs dry.
pub fn read_string(reader: &mut dyn Reader) -> Result<String, WireError> {
    let len = read_len(reader)?;

    if let Some(remaining) = reader.remaining_hint()
        && len > remaining
    {
        return Err(WireError::unexpected_eof(len - remaining));
    }

    let mut bytes = Vec::with_capacity(len.min(READ_CHUNK));
    let mut chunk = [0u8; READ_CHUNK];
    let mut left = len;
    while left > 0 {
        let step = left.min(READ_CHUNK);
        reader.read(&mut chunk[..step])?;
        bytes.extend_from_slice(&chunk[..step]);
        left -= step;
    }

    String::from_utf8(bytes).map_err(|_| WireError::invalid_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::IoReader;

    #[test]
    fn multibyte_text() {
        let text = "héllo, мир, 世界 🦀";
        let mut bytes = Vec::new();
        write_str(&mut bytes, text).unwrap();
        assert_eq!(bytes[0] as usize, text.len());

        let decoded = read_string(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn long_text_crosses_chunks() {
        let text = "ab".repeat(READ_CHUNK + 7);
        let mut bytes = Vec::new();
        write_str(&mut bytes, &text).unwrap();

        // No size hint from this source.
        let mut reader = IoReader(std::io::Cursor::new(bytes));
        assert_eq!(read_string(&mut reader).unwrap(), text);
    }

    #[test]
    fn invalid_utf8() {
        let bytes = [0x02u8, 0xC3, 0x28];
        let err = read_string(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::InvalidUtf8));
    }

    #[test]
    fn corrupted_length_prefix() {
        // Declares 2^20 bytes, provides one.
        let mut bytes = Vec::new();
        write_len(&mut bytes, 1 << 20).unwrap();
        bytes.push(b'a');
        let err = read_string(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { .. }));

        let mut reader = IoReader(std::io::Cursor::new(bytes));
        let err = read_string(&mut reader).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { .. }));
    }
}
