//! Thin RLP adapter used by the extra-data codec.
//!
//! Encoding goes through [`ListEncoder`], which only knows how to append
//! byte strings, nulls, null arrays and nested lists. Decoding goes through
//! [`RlpValue`], a borrowed view of one RLP item. Length prefixes are parsed
//! by [`alloy_rlp::Header`], so non-canonical encodings are rejected there.

use alloy_primitives::Address;
use alloy_rlp::{BufMut, Encodable, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use std::fmt;

use crate::constants::ADDRESS_LENGTH;

/// Builder for a single RLP list.
#[derive(Debug, Clone, Default)]
pub struct ListEncoder {
    payload: Vec<u8>,
}

impl ListEncoder {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte string
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        bytes.encode(&mut self.payload);
    }

    /// Append a null value (the empty string)
    pub fn append_null(&mut self) {
        self.payload.push(EMPTY_STRING_CODE);
    }

    /// Append a null-array marker (the empty list)
    pub fn append_null_array(&mut self) {
        self.payload.push(EMPTY_LIST_CODE);
    }

    /// Append a nested list
    pub fn append_list(&mut self, list: &ListEncoder) {
        list.encode(&mut self.payload);
    }

    /// Length of the list payload, without its header
    pub fn payload_length(&self) -> usize {
        self.payload.len()
    }

    fn header(&self) -> Header {
        Header { list: true, payload_length: self.payload.len() }
    }
}

impl Encodable for ListEncoder {
    fn encode(&self, out: &mut dyn BufMut) {
        self.header().encode(out);
        out.put_slice(&self.payload);
    }

    fn length(&self) -> usize {
        self.header().length() + self.payload.len()
    }
}

/// Shape of a decoded RLP item, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Byte string of the given length
    String(usize),
    /// List with a payload of the given length
    List(usize),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(len) => write!(f, "{len}-byte string"),
            Self::List(len) => write!(f, "list with {len}-byte payload"),
        }
    }
}

/// Borrowed view of a single RLP item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpValue<'a> {
    /// Byte string payload
    Bytes(&'a [u8]),
    /// Raw list payload, not yet split into elements
    List(&'a [u8]),
}

impl<'a> RlpValue<'a> {
    /// Parse one item from the front of `buf`, advancing it past the item.
    pub fn parse(buf: &mut &'a [u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        let input: &'a [u8] = *buf;
        let (payload, rest) = input.split_at(header.payload_length);
        *buf = rest;

        Ok(if header.list { Self::List(payload) } else { Self::Bytes(payload) })
    }

    /// Split a list payload into its elements.
    pub fn elements_of(mut payload: &'a [u8]) -> alloy_rlp::Result<Vec<Self>> {
        let mut elements = Vec::new();
        while !payload.is_empty() {
            elements.push(Self::parse(&mut payload)?);
        }
        Ok(elements)
    }

    /// Elements of this item, or `None` if it is a byte string.
    pub fn elements(&self) -> Option<alloy_rlp::Result<Vec<Self>>> {
        match *self {
            Self::List(payload) => Some(Self::elements_of(payload)),
            Self::Bytes(_) => None,
        }
    }

    /// Byte string payload, or `None` if this item is a list.
    /// The null value decodes to an empty slice.
    pub fn bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// Exactly-20-byte address. Any other length is rejected, never padded.
    pub fn fixed_address(&self) -> Option<Address> {
        self.bytes()
            .filter(|bytes| bytes.len() == ADDRESS_LENGTH)
            .map(Address::from_slice)
    }

    /// Shape of this item
    pub fn kind(&self) -> ValueKind {
        match *self {
            Self::Bytes(bytes) => ValueKind::String(bytes.len()),
            Self::List(payload) => ValueKind::List(payload.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(list: &ListEncoder) -> Vec<u8> {
        let mut out = Vec::new();
        list.encode(&mut out);
        assert_eq!(out.len(), list.length());
        out
    }

    #[test]
    fn test_empty_list_encoding() {
        assert_eq!(encoded(&ListEncoder::new()), vec![0xc0]);
    }

    #[test]
    fn test_null_markers() {
        let mut list = ListEncoder::new();
        list.append_null();
        list.append_null_array();
        assert_eq!(encoded(&list), vec![0xc2, 0x80, 0xc0]);
    }

    #[test]
    fn test_nested_list_and_bytes() {
        let mut inner = ListEncoder::new();
        inner.append_bytes(b"dog");
        let mut outer = ListEncoder::new();
        outer.append_list(&inner);
        outer.append_bytes(&[0x01]);

        assert_eq!(encoded(&outer), hex::decode("c6c483646f6701").unwrap());
    }

    #[test]
    fn test_long_payload_uses_long_header() {
        let mut list = ListEncoder::new();
        list.append_bytes(&[0xaa; 60]);
        let out = encoded(&list);
        // 60-byte string encodes as 0xb8 0x3c + data = 62 bytes, list header 0xf8 0x3e
        assert_eq!(&out[..4], &[0xf8, 0x3e, 0xb8, 0x3c]);
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn test_parse_single_byte_string() {
        let input = [0x7f];
        let mut buf = &input[..];
        let value = RlpValue::parse(&mut buf).unwrap();
        assert_eq!(value, RlpValue::Bytes(&[0x7f]));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_parse_advances_past_item() {
        let input = hex::decode("83646f6780").unwrap();
        let mut buf = &input[..];
        assert_eq!(RlpValue::parse(&mut buf).unwrap(), RlpValue::Bytes(b"dog"));
        assert_eq!(RlpValue::parse(&mut buf).unwrap(), RlpValue::Bytes(&[]));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_elements_of_list() {
        let input = hex::decode("c6c483646f6701").unwrap();
        let mut buf = &input[..];
        let value = RlpValue::parse(&mut buf).unwrap();
        let elements = value.elements().unwrap().unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind(), ValueKind::List(4));
        assert_eq!(elements[1].bytes(), Some(&[0x01][..]));
    }

    #[test]
    fn test_elements_of_string_is_none() {
        assert!(RlpValue::Bytes(b"abc").elements().is_none());
        assert!(RlpValue::List(&[]).bytes().is_none());
    }

    #[test]
    fn test_fixed_address_requires_exact_length() {
        let twenty = [0x11u8; 20];
        assert_eq!(
            RlpValue::Bytes(&twenty).fixed_address(),
            Some(Address::repeat_byte(0x11))
        );
        assert_eq!(RlpValue::Bytes(&[0x11; 19]).fixed_address(), None);
        assert_eq!(RlpValue::Bytes(&[0x11; 21]).fixed_address(), None);
        assert_eq!(RlpValue::List(&[]).fixed_address(), None);
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        let input = [0x83, b'd', b'o'];
        let mut buf = &input[..];
        assert_eq!(RlpValue::parse(&mut buf), Err(alloy_rlp::Error::InputTooShort));
    }

    #[test]
    fn test_parse_rejects_non_canonical_single_byte() {
        let input = [0x81, 0x05];
        let mut buf = &input[..];
        assert_eq!(RlpValue::parse(&mut buf), Err(alloy_rlp::Error::NonCanonicalSingleByte));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::String(19).to_string(), "19-byte string");
        assert_eq!(ValueKind::List(0).to_string(), "list with 0-byte payload");
    }
}
