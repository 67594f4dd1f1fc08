use alloc::vec::Vec;

use super::WireError;

/// A byte sink.
///
/// `write` either accepts the whole buffer or fails; bytes already accepted by
/// earlier calls are never rolled back.
pub trait Writer {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError>;

    #[inline]
    fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        self.write(&[byte])
    }
}

/// A byte source.
///
/// `read` fills the whole buffer or fails.
pub trait Reader {
    fn read(&mut self, buf: &mut [u8]) -> Result<(), WireError>;

    #[inline]
    fn read_u8(&mut self) -> Result<u8, WireError> {
        let mut byte = [0u8; 1];
        self.read(&mut byte)?;
        Ok(byte[0])
    }

    /// Number of bytes still available, when the source knows it.
    #[inline]
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}

impl Writer for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        self.push(byte);
        Ok(())
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        (**self).write(bytes)
    }
}

/// Reading from a slice advances it past the consumed bytes.
/// A short read leaves the slice untouched.
impl Reader for &[u8] {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        match self.split_at_checked(buf.len()) {
            Some((head, tail)) => {
                buf.copy_from_slice(head);
                *self = tail;
                Ok(())
            }
            None => Err(WireError::unexpected_eof(buf.len() - self.len())),
        }
    }

    #[inline]
    fn remaining_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<R: Reader + ?Sized> Reader for &mut R {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        (**self).read(buf)
    }

    #[inline]
    fn remaining_hint(&self) -> Option<usize> {
        (**self).remaining_hint()
    }
}

// -----------------------------------------------------------------------------
// SliceWriter

/// A fixed-capacity sink over a caller-provided buffer.
///
/// A write that does not fit fails with [`WireError::ShortWrite`] and leaves
/// the buffer untouched.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl Writer for SliceWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let available = self.buf.len() - self.pos;
        if bytes.len() > available {
            return Err(WireError::short_write(available, bytes.len()));
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// std::io adapters

/// Adapts any [`std::io::Write`] into a [`Writer`].
#[derive(Debug, Default)]
pub struct IoWriter<W>(pub W);

impl<W: std::io::Write> Writer for IoWriter<W> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.0.write_all(bytes).map_err(WireError::from)
    }
}

impl<W> IoWriter<W> {
    #[inline]
    pub fn into_inner(self) -> W {
        self.0
    }
}

/// Adapts any [`std::io::Read`] into a [`Reader`].
#[derive(Debug, Default)]
pub struct IoReader<R>(pub R);

impl<R: std::io::Read> Reader for IoReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        match self.0.read_exact(buf) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                Err(WireError::unexpected_eof(buf.len()))
            }
            Err(err) => Err(WireError::from(err)),
        }
    }
}

impl<R> IoReader<R> {
    #[inline]
    pub fn into_inner(self) -> R {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ErrorKind;

    #[test]
    fn slice_reader_short_read_keeps_position() {
        let mut reader: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 2];
        reader.read(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);

        let err = reader.read(&mut buf).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { needed: 1 }));
        assert_eq!(reader.remaining_hint(), Some(1));
        assert_eq!(reader.read_u8().unwrap(), 3);
    }

    #[test]
    fn slice_writer_reports_short_write() {
        let mut storage = [0u8; 3];
        let mut writer = SliceWriter::new(&mut storage);
        writer.write(&[9, 8]).unwrap();

        let err = writer.write(&[7, 6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShortWrite);
        assert_eq!(writer.written(), &[9, 8]);
        writer.write_u8(5).unwrap();
        assert_eq!(storage, [9, 8, 5]);
    }

    #[test]
    fn io_adapters() {
        let mut writer = IoWriter(Vec::new());
        writer.write(&[1, 2, 3]).unwrap();
        let bytes = writer.into_inner();

        let mut reader = IoReader(std::io::Cursor::new(bytes));
        let mut buf = [0u8; 2];
        reader.read(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShortRead);
    }
}
