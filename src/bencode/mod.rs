use std::path::Path;

pub mod bvalue;
pub mod decoder;
pub mod encoder;
pub mod error;


pub use bvalue::BValue;
pub use error::BencodeError;

/// Bencode codec entry points
#[derive(Debug, Clone, Copy)]
pub struct Bencode;

impl Bencode {
    /// Decode a complete bencoded buffer
    pub fn decode_bytes(input: &[u8]) -> Result<BValue, BencodeError> {
        decoder::decode(input)
    }

    /// Decode the bencoded contents of a file
    pub fn decode_file(path: impl AsRef<Path>) -> crate::Result<BValue> {
        let contents = std::fs::read(path.as_ref())?;
        Ok(Self::decode_bytes(&contents)?)
    }

    /// Encode a value to its canonical bencoded bytes
    pub fn encode(value: &BValue) -> Vec<u8> {
        encoder::Encoder::new().encode(value)
    }
}
