use crate::{DecodeError, DecodedFrame, Field};
use bytes::Bytes;
use rmpv::Value;

/// Nesting allowed for the image, text and format values: a scalar or a blob.
const FIELD_DEPTH: usize = 2;
/// Nesting allowed for the trailer, enough for a list of points.
const TRAILER_DEPTH: usize = 8;

/// Decodes one complete upload record.
///
/// The record is three MessagePack values in a row: the image blob, the
/// recognized text and its format tag. Senders may append one more value
/// (a numeric hint from the camera side), which is read and thrown away.
/// Anything past that is rejected.
pub fn decode_frame(mut src: &[u8]) -> Result<DecodedFrame, DecodeError> {
    let image = blob(next_value(&mut src, Field::Image)?)?;
    let text = string(next_value(&mut src, Field::Text)?, Field::Text)?;
    let format = string(next_value(&mut src, Field::Format)?, Field::Format)?;

    if !src.is_empty() {
        next_value(&mut src, Field::Trailer)?;
    }
    if !src.is_empty() {
        return Err(DecodeError::TrailingBytes(src.len()));
    }

    Ok(DecodedFrame {
        image,
        text,
        format,
    })
}

fn next_value(src: &mut &[u8], field: Field) -> Result<Value, DecodeError> {
    if src.is_empty() {
        return Err(DecodeError::Missing(field));
    }
    let max_depth = match field {
        Field::Trailer => TRAILER_DEPTH,
        _ => FIELD_DEPTH,
    };
    rmpv::decode::read_value_with_max_depth(src, max_depth)
        .map_err(|source| DecodeError::Malformed { field, source })
}

// Older msgpack writers emit raw bytes with the str marker, so both families count as a blob.
fn blob(value: Value) -> Result<Bytes, DecodeError> {
    match value {
        Value::Binary(bytes) => Ok(Bytes::from(bytes)),
        Value::String(raw) => Ok(Bytes::from(raw.into_bytes())),
        other => Err(DecodeError::UnexpectedType {
            field: Field::Image,
            expected: "binary",
            found: kind(&other),
        }),
    }
}

fn string(value: Value, field: Field) -> Result<String, DecodeError> {
    match value {
        Value::Nil => Ok(String::new()),
        Value::String(s) => s.into_str().ok_or(DecodeError::InvalidUtf8(field)),
        Value::Binary(bytes) => {
            String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8(field))
        }
        other => Err(DecodeError::UnexpectedType {
            field,
            expected: "string",
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::F32(_) | Value::F64(_) => "float",
        Value::String(_) => "string",
        Value::Binary(_) => "binary",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Ext(..) => "extension",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pack(values: &[Value]) -> Vec<u8> {
        let mut buffer = Vec::new();
        for value in values {
            rmpv::encode::write_value(&mut buffer, value).unwrap();
        }
        buffer
    }

    #[test]
    fn decodes_example() {
        let bytes = [
            0xc4, 0x02, 0xff, 0xd8, 0xa6, 0x41, 0x42, 0x43, 0x31, 0x32, 0x33, 0xa2, 0x51, 0x52,
        ];
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame, DecodedFrame::new(vec![0xffu8, 0xd8], "ABC123", "QR"));
    }

    #[test]
    fn decodes_with_trailer() {
        let bytes = pack(&[
            Value::Binary(vec![1, 2, 3]),
            Value::from("hello"),
            Value::from("PNG"),
            Value::from(30),
        ]);
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame, DecodedFrame::new(vec![1u8, 2, 3], "hello", "PNG"));
    }

    #[test]
    fn accepts_point_list_trailer() {
        let points = Value::Array(vec![
            Value::Array(vec![Value::from(12), Value::from(40)]),
            Value::Array(vec![Value::from(90), Value::from(41)]),
        ]);
        let bytes = pack(&[
            Value::Binary(vec![7]),
            Value::from("ABC"),
            Value::from("QR"),
            points,
        ]);
        assert_eq!(
            decode_frame(&bytes).unwrap(),
            DecodedFrame::new(vec![7u8], "ABC", "QR")
        );
    }

    #[test]
    fn rejects_deeply_nested_trailer() {
        let mut bytes = vec![0xc4, 0x01, 0x00, 0xa0, 0xa0];
        bytes.extend(std::iter::repeat(0x91).take(600));
        bytes.push(0x01);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::Malformed {
                field: Field::Trailer,
                ..
            })
        ));
    }

    #[test]
    fn rejects_nested_text() {
        let mut bytes = vec![0xc4, 0x01, 0x00];
        bytes.extend(std::iter::repeat(0x91).take(600));
        bytes.extend([0xa0, 0xa0]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::Malformed {
                field: Field::Text,
                ..
            })
        ));
    }

    #[test]
    fn nil_text_is_empty() {
        let bytes = pack(&[Value::Binary(vec![0x89]), Value::Nil, Value::Nil]);
        let frame = decode_frame(&bytes).unwrap();
        assert!(frame.text.is_empty());
        assert!(frame.format.is_empty());
    }

    #[test]
    fn accepts_raw_str_image_and_binary_text() {
        let raw = rmpv::Utf8String::from(String::from_utf8_lossy(&[0x41, 0x42]).into_owned());
        let bytes = pack(&[
            Value::String(raw),
            Value::Binary(b"text".to_vec()),
            Value::Binary(b"EAN_13".to_vec()),
        ]);
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame, DecodedFrame::new(&b"AB"[..], "text", "EAN_13"));
    }

    #[test]
    fn keeps_non_utf8_raw_image() {
        // str8 marker carrying a JPEG header, as msgpack-c raw_ref writes it
        let bytes = [0xd9, 0x02, 0xff, 0xd8, 0xa0, 0xa0];
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(&frame.image[..], &[0xff, 0xd8]);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            decode_frame(&[]),
            Err(DecodeError::Missing(Field::Image))
        ));
    }

    #[test]
    fn rejects_truncated_image() {
        let bytes = [0xc4, 0x04, 0xff, 0xd8];
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::Malformed {
                field: Field::Image,
                ..
            })
        ));
    }

    #[test]
    fn rejects_missing_values() {
        let bytes = pack(&[Value::Binary(vec![1]), Value::from("ABC")]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::Missing(Field::Format))
        ));
    }

    #[test]
    fn rejects_extra_values() {
        let bytes = pack(&[
            Value::Binary(vec![1]),
            Value::from("ABC"),
            Value::from("QR"),
            Value::from(1),
            Value::from(2),
        ]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::TrailingBytes(1))
        ));
    }

    #[test]
    fn rejects_wrong_types() {
        let bytes = pack(&[Value::from(42), Value::from("ABC"), Value::from("QR")]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::UnexpectedType {
                field: Field::Image,
                found: "integer",
                ..
            })
        ));

        let bytes = pack(&[Value::Binary(vec![1]), Value::from(7), Value::from("QR")]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::UnexpectedType {
                field: Field::Text,
                ..
            })
        ));

        let bytes = pack(&[
            Value::Binary(vec![1]),
            Value::from("ABC"),
            Value::Array(vec![Value::from(1)]),
        ]);
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::UnexpectedType {
                field: Field::Format,
                found: "array",
                ..
            })
        ));
    }

    #[test]
    fn rejects_invalid_utf8_text() {
        let bytes = [0xc4, 0x01, 0x00, 0xc4, 0x02, 0xc3, 0x28, 0xa2, 0x51, 0x52];
        assert!(matches!(
            decode_frame(&bytes),
            Err(DecodeError::InvalidUtf8(Field::Text))
        ));
    }
}
