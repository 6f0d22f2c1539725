use bytes::Bytes;
use std::collections::BTreeMap;

use super::error::BencodeError;

/// Represents a Bencode value as defined in the BitTorrent specification.
///
/// Bencode (pronounced like B-encode) supports four different types of values:
/// - Byte strings (kept as raw bytes, never decoded as text here)
/// - Integers
/// - Lists
/// - Dictionaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    /// An integer value, can be positive or negative
    /// Example: `i42e` represents 42
    Integer(i64),

    /// A byte string, prefixed with its length
    /// Example: `4:spam` represents "spam"
    String(Bytes),

    /// A list of BValue elements
    /// Example: `l4:spami42ee` represents ["spam", 42]
    List(Vec<BValue>),

    /// A dictionary mapping byte strings to BValues, ordered by raw bytes
    /// Example: `d3:bar4:spam3:fooi42ee` represents {"bar": "spam", "foo": 42}
    Dict(BTreeMap<Bytes, BValue>),
}

impl BValue {
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::bencode::encoder::Encoder::new().encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BencodeError> {
        crate::bencode::decoder::decode(bytes)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, BValue>> {
        match self {
            BValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        self.as_dict()?.get(key)
    }
}

impl From<&str> for BValue {
    fn from(s: &str) -> Self {
        BValue::String(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<&[u8]> for BValue {
    fn from(s: &[u8]) -> Self {
        BValue::String(Bytes::copy_from_slice(s))
    }
}
