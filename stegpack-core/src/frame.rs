//! Frame encoding and decoding
//!
//! A frame is the record both embedding strategies carry:
//!
//! ```text
//! magic (6) | name_len (u32 BE) | name (UTF-8) | data_len (u32 BE) | data
//! ```

use crate::constants::{FRAME_MAGIC, FRAME_OVERHEAD, LENGTH_FIELD_SIZE};
use crate::error::StegError;
use crate::types::Frame;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use core::ops::Range;

/// Encode a name and payload into frame bytes
///
/// No size limits are applied here; the pixel codec checks capacity.
/// Fails only if a field length does not fit the 4-byte prefix.
pub fn encode_frame(name: &str, data: &[u8]) -> Result<Bytes, StegError> {
    let name_len = length_prefix(name.len())?;
    let data_len = length_prefix(data.len())?;

    let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + name.len() + data.len());
    buf.put_slice(FRAME_MAGIC);
    buf.put_u32(name_len);
    buf.put_slice(name.as_bytes());
    buf.put_u32(data_len);
    buf.put_slice(data);

    Ok(buf.freeze())
}

/// Encode a complete Frame struct
pub fn encode_frame_struct(frame: &Frame) -> Result<Bytes, StegError> {
    encode_frame(&frame.name, &frame.data)
}

/// Whether `buf` opens with the frame magic
pub fn has_magic(buf: &[u8]) -> bool {
    buf.starts_with(FRAME_MAGIC)
}

/// Decode a frame from a byte slice, copying name and data
///
/// Bytes after the data field are ignored.
pub fn decode_frame(buf: &[u8]) -> Result<Frame, StegError> {
    let (name, data) = locate_fields(buf)?;
    let name = decode_name(&buf[name])?;

    Ok(Frame::new(name, Bytes::copy_from_slice(&buf[data])))
}

/// Decode a frame without copying the data field
///
/// The returned frame's `data` is a slice of `buf`.
pub fn decode_frame_zero_copy(buf: Bytes) -> Result<Frame, StegError> {
    let (name, data) = locate_fields(&buf)?;
    let name = decode_name(&buf[name])?;

    Ok(Frame::new(name, buf.slice(data)))
}

fn length_prefix(len: usize) -> Result<u32, StegError> {
    u32::try_from(len).map_err(|_| StegError::FieldOverflow(len))
}

fn decode_name(bytes: &[u8]) -> Result<String, StegError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| StegError::InvalidName)
}

/// Validate the magic and both length fields, returning the name and data ranges
fn locate_fields(buf: &[u8]) -> Result<(Range<usize>, Range<usize>), StegError> {
    if !has_magic(buf) {
        return Err(StegError::NotRecognized);
    }

    let mut cursor = &buf[FRAME_MAGIC.len()..];
    let name = take_field(&mut cursor, buf.len())?;
    let data = take_field(&mut cursor, buf.len())?;

    Ok((name, data))
}

/// Read one length-prefixed field, advancing `cursor` past it
fn take_field(cursor: &mut &[u8], total: usize) -> Result<Range<usize>, StegError> {
    let offset = total - cursor.len();
    if cursor.remaining() < LENGTH_FIELD_SIZE {
        return Err(StegError::Truncated {
            expected: offset + LENGTH_FIELD_SIZE,
            actual: total,
        });
    }

    let len = cursor.get_u32() as usize;
    let start = offset + LENGTH_FIELD_SIZE;
    if cursor.remaining() < len {
        return Err(StegError::Truncated {
            expected: start.saturating_add(len),
            actual: total,
        });
    }
    cursor.advance(len);

    Ok(start..start + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let encoded = encode_frame("a.txt", &[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(&encoded[0..6], b"STGPAK");
        assert_eq!(&encoded[6..10], &5u32.to_be_bytes());
        assert_eq!(&encoded[10..15], b"a.txt");
        assert_eq!(&encoded[15..19], &5u32.to_be_bytes());
        assert_eq!(&encoded[19..], &[1, 2, 3, 4, 5]);
        assert_eq!(encoded.len(), FRAME_OVERHEAD + 5 + 5);
    }

    #[test]
    fn test_decode_simple_frame() {
        let encoded = encode_frame("notes.md", b"# hello").unwrap();
        let frame = decode_frame(&encoded).unwrap();

        assert_eq!(frame.name, "notes.md");
        assert_eq!(frame.data.as_ref(), b"# hello");
    }

    #[test]
    fn test_decode_ignores_trailing_padding() {
        let mut padded = encode_frame("x", b"yz").unwrap().to_vec();
        padded.extend_from_slice(&[0u8; 7]);

        let frame = decode_frame(&padded).unwrap();
        assert_eq!(frame.name, "x");
        assert_eq!(frame.data.as_ref(), b"yz");
    }

    #[test]
    fn test_decode_bad_magic() {
        assert!(matches!(
            decode_frame(b"NOPE00\x00\x00\x00\x00"),
            Err(StegError::NotRecognized)
        ));
        assert!(matches!(decode_frame(b"STG"), Err(StegError::NotRecognized)));
    }

    #[test]
    fn test_decode_truncated_name() {
        let mut buf = FRAME_MAGIC.to_vec();
        buf.extend_from_slice(&100u32.to_be_bytes());
        buf.extend_from_slice(b"short");

        match decode_frame(&buf) {
            Err(StegError::Truncated { expected, actual }) => {
                assert_eq!(expected, 10 + 100);
                assert_eq!(actual, buf.len());
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_data_length() {
        let encoded = encode_frame("name", b"data").unwrap();
        // Cut inside the data length field
        let result = decode_frame(&encoded[..FRAME_MAGIC.len() + 4 + 4 + 2]);
        assert!(matches!(result, Err(StegError::Truncated { .. })));
    }

    #[test]
    fn test_decode_huge_length_does_not_overflow() {
        let mut buf = FRAME_MAGIC.to_vec();
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&u32::MAX.to_be_bytes());

        assert!(matches!(decode_frame(&buf), Err(StegError::Truncated { .. })));
    }

    #[test]
    fn test_decode_invalid_utf8_name() {
        let mut buf = FRAME_MAGIC.to_vec();
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&[0xC3, 0x28]);
        buf.extend_from_slice(&0u32.to_be_bytes());

        assert!(matches!(decode_frame(&buf), Err(StegError::InvalidName)));
    }

    #[test]
    fn test_zero_copy_round_trip() {
        let encoded = encode_frame("élan.bin", &[9u8; 32]).unwrap();
        let frame = decode_frame_zero_copy(encoded.clone()).unwrap();

        assert_eq!(frame.name, "élan.bin");
        assert_eq!(frame.data.as_ref(), &[9u8; 32]);
        assert_eq!(encode_frame_struct(&frame).unwrap(), encoded);
    }

    #[test]
    fn test_empty_name_and_data() {
        let encoded = encode_frame("", &[]).unwrap();
        assert_eq!(encoded.len(), FRAME_OVERHEAD);

        let frame = decode_frame(&encoded).unwrap();
        assert!(frame.name.is_empty());
        assert!(frame.data.is_empty());
    }
}
