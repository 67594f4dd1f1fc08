use super::{Reader, Tag, WireError, Writer, check_tag, write_str, write_tag};

/// Binary encoding of one type.
///
/// `encode` writes the value payload only. The tag is written by callers that
/// need a self-describing stream ([`encode_tagged`](WireCodec::encode_tagged)),
/// and in type-information blocks ([`encode_type_info`](WireCodec::encode_type_info)).
///
/// `decode` fills an existing value in place. On failure the value may be
/// partially updated and the reader is left wherever the failure occurred.
pub trait WireCodec {
    /// The tag identifying this type's wire shape.
    const TAG: Tag;

    fn encode(&self, writer: &mut dyn Writer) -> Result<(), WireError>;

    fn decode(&mut self, reader: &mut dyn Reader) -> Result<(), WireError>;

    /// Write the type-information block of this type.
    ///
    /// Defaults to the bare tag, which is correct for scalars and strings.
    fn encode_type_info(writer: &mut dyn Writer) -> Result<(), WireError>
    where
        Self: Sized,
    {
        write_tag(writer, Self::TAG)
    }

    /// Write the tag, then the payload.
    fn encode_tagged(&self, writer: &mut dyn Writer) -> Result<(), WireError> {
        write_tag(writer, Self::TAG)?;
        self.encode(writer)
    }

    /// Require the tag, then decode the payload.
    fn decode_tagged(&mut self, reader: &mut dyn Reader) -> Result<(), WireError> {
        check_tag(reader, Self::TAG)?;
        self.decode(reader)
    }
}

/// Type-information block of a class: [`Tag::Class`] then the class name.
pub fn write_class_type_info(writer: &mut dyn Writer, class_name: &str) -> Result<(), WireError> {
    write_tag(writer, Tag::Class)?;
    write_str(writer, class_name)
}
