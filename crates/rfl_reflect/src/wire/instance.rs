use super::{Reader, WireError, Writer};
use crate::Reflect;
use crate::access::{ReflectedFields, ReflectedFieldsMut};
use crate::info::FieldSet;

/// Encode every field of `value` in flattened order, each with its declared
/// type's codec and without a per-field tag.
///
/// Stops at the first failing field; bytes written before it stay written.
pub fn encode_instance(
    value: &dyn Reflect,
    field_set: &'static FieldSet,
    writer: &mut dyn Writer,
) -> Result<(), WireError> {
    crate::debug_trace!("encoding instance of `{}`", field_set.class_name());
    ReflectedFields::new(value, field_set)
        .iter()
        .try_for_each(|field| field.serialize(writer))
}

/// Decode every field of `value` in place, in the order [`encode_instance`]
/// wrote them.
///
/// Stops at the first failing field; fields decoded before it keep their new
/// values.
pub fn decode_instance(
    value: &mut dyn Reflect,
    field_set: &'static FieldSet,
    reader: &mut dyn Reader,
) -> Result<(), WireError> {
    crate::debug_trace!("decoding instance of `{}`", field_set.class_name());
    ReflectedFieldsMut::new(value, field_set).try_for_each(|mut field| field.deserialize(reader))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::derive::Reflect;
    use crate::impls::ReflectBox;
    use crate::info::Class;
    use crate::wire::{ErrorKind, SliceWriter, WireCodec, WireError};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Origin {
        x: i32,
        y: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Named {
        #[reflect(base)]
        origin: Origin,
        name: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Tagged {
        #[reflect(base)]
        named: Named,
        #[reflect(config)]
        enabled: bool,
        weights: Vec<f64>,
    }

    fn sample() -> Tagged {
        Tagged {
            named: Named {
                origin: Origin { x: -1, y: 64 },
                name: String::from("pt"),
            },
            enabled: true,
            weights: vec![0.5, -0.25],
        }
    }

    #[test]
    fn flattened_order() {
        let mut bytes = Vec::new();
        sample().encode(&mut bytes).unwrap();

        let mut expected = vec![0x01]; // enabled
        expected.push(0x02); // weights len
        expected.extend_from_slice(&0.5f64.to_ne_bytes());
        expected.extend_from_slice(&(-0.25f64).to_ne_bytes());
        expected.extend_from_slice(&[0x02, b'p', b't']); // name
        expected.extend_from_slice(&[0x41]); // x
        expected.extend_from_slice(&[0xC0, 0x00]); // y
        assert_eq!(bytes, expected);
    }

    #[test]
    fn three_level_round_trip() {
        let value = sample();
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();

        let mut decoded = Tagged::default();
        let mut reader = bytes.as_slice();
        decoded.decode(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded, value);
    }

    #[test]
    fn truncated_stream_keeps_decoded_prefix() {
        let mut bytes = Vec::new();
        sample().encode(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 2);

        let mut decoded = Tagged::default();
        let err = decoded.decode(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShortRead);
        assert!(decoded.enabled);
        assert_eq!(decoded.named.name, "pt");
        assert_eq!(decoded.named.origin, Origin { x: -1, y: 0 });
    }

    #[test]
    fn short_writer_fails() {
        let mut storage = [0u8; 4];
        let mut writer = SliceWriter::new(&mut storage);
        let err = sample().encode(&mut writer).unwrap_err();
        assert!(matches!(err, WireError::ShortWrite { .. }));
        assert_eq!(writer.written(), &[0x01, 0x02]);
    }

    #[derive(Reflect, Default, Debug)]
    struct Slot {
        index: u8,
        item: ReflectBox,
    }

    #[test]
    fn polymorphic_field() {
        let value = Slot {
            index: 3,
            item: ReflectBox::new(Origin { x: 5, y: -5 }),
        };
        let mut bytes = Vec::new();
        value.encode(&mut bytes).unwrap();

        let mut reader = bytes.as_slice();
        let mut decoded = Slot {
            index: 0,
            item: ReflectBox::new(Origin::default()),
        };
        decoded.decode(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded.index, 3);
        assert_eq!(decoded.item.downcast_ref::<Origin>(), Some(&Origin { x: 5, y: -5 }));
        assert!(Slot::field_set().field("item").unwrap().is_polymorphic());
    }
}
