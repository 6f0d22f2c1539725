//! Bencode encoder implementation following the BitTorrent protocol specification.
//!
//! This module encodes [`BValue`]s into the Bencode format as defined in the
//! [BitTorrent protocol specification](http://www.bittorrent.org/beps/bep_0003.html#bencoding).
//!
//! The encoding rules are:
//! - Strings are length-prefixed base10 followed by a colon and the raw bytes
//! - Integers are 'i' followed by the number in base10 followed by 'e'
//! - Lists are 'l' followed by their elements followed by 'e'
//! - Dictionaries are 'd' followed by alternating keys and values followed by 'e',
//!   keys in ascending byte order
//!
//! For every value the decoder accepts, encoding reproduces the original input exactly.

use bytes::Bytes;
use std::collections::BTreeMap;

use crate::bencode::bvalue::BValue;

/// An encoder for converting [`BValue`]s into Bencode bytes.
#[derive(Debug, Default)]
pub struct Encoder {
    output: Vec<u8>,
}

impl Encoder {
    /// Creates a new encoder with an empty output buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `value` and returns the encoded bytes, consuming the encoder.
    pub fn encode(mut self, value: &BValue) -> Vec<u8> {
        self.encode_value(value);
        self.output
    }

    fn encode_value(&mut self, value: &BValue) {
        match value {
            BValue::Integer(n) => self.encode_integer(*n),
            BValue::String(s) => self.encode_string(s),
            BValue::List(list) => self.encode_list(list),
            BValue::Dict(dict) => self.encode_dict(dict),
        }
    }

    /// Encodes an integer in the format: i<number>e
    fn encode_integer(&mut self, n: i64) {
        self.output.push(b'i');
        self.output.extend_from_slice(n.to_string().as_bytes());
        self.output.push(b'e');
    }

    /// Encodes a string in the format: <length>:<bytes>
    fn encode_string(&mut self, s: &[u8]) {
        self.output.extend_from_slice(s.len().to_string().as_bytes());
        self.output.push(b':');
        self.output.extend_from_slice(s);
    }

    /// Encodes a list in the format: l<bencoded values>e
    fn encode_list(&mut self, list: &[BValue]) {
        self.output.push(b'l');
        for item in list {
            self.encode_value(item);
        }
        self.output.push(b'e');
    }

    /// Encodes a dictionary in the format: d<bencoded string><bencoded value>e
    fn encode_dict(&mut self, dict: &BTreeMap<Bytes, BValue>) {
        self.output.push(b'd');
        for (key, value) in dict {
            self.encode_string(key);
            self.encode_value(value);
        }
        self.output.push(b'e');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: &[(&str, BValue)]) -> BValue {
        BValue::Dict(
            entries
                .iter()
                .map(|(k, v)| (Bytes::copy_from_slice(k.as_bytes()), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_encode_integer() {
        assert_eq!(BValue::Integer(42).to_bytes(), b"i42e");
        assert_eq!(BValue::Integer(-42).to_bytes(), b"i-42e");
        assert_eq!(BValue::Integer(0).to_bytes(), b"i0e");
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(BValue::from("spam").to_bytes(), b"4:spam");
        assert_eq!(BValue::from("").to_bytes(), b"0:");
        assert_eq!(
            BValue::from("Hello, World!").to_bytes(),
            b"13:Hello, World!"
        );
        assert_eq!(BValue::from(&[0xffu8, 0x00][..]).to_bytes(), b"2:\xff\x00");
    }

    #[test]
    fn test_encode_list() {
        let list = BValue::List(vec![BValue::from("spam"), BValue::Integer(42)]);
        assert_eq!(list.to_bytes(), b"l4:spami42ee");
        assert_eq!(BValue::List(vec![]).to_bytes(), b"le");
    }

    #[test]
    fn test_encode_dict_sorts_keys() {
        let value = dict(&[("foo", BValue::Integer(42)), ("bar", BValue::from("spam"))]);
        assert_eq!(value.to_bytes(), b"d3:bar4:spam3:fooi42ee");
        assert_eq!(dict(&[]).to_bytes(), b"de");
    }

    #[test]
    fn test_encode_nested() {
        let value = dict(&[
            (
                "dict",
                dict(&[("x", BValue::from("y")), ("z", BValue::Integer(42))]),
            ),
            (
                "list",
                BValue::List(vec![BValue::from("a"), BValue::from("b")]),
            ),
        ]);
        let encoded = value.to_bytes();
        assert_eq!(encoded, b"d4:dictd1:x1:y1:zi42ee4:listl1:a1:bee");
        assert_eq!(BValue::from_bytes(&encoded).unwrap(), value);
    }
}
