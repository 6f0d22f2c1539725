use thiserror::Error;

/// Grammar violations found while decoding bencode. Positions are byte offsets
/// into the input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BencodeError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error("invalid integer at byte {position}: {reason}")]
    InvalidInteger { position: usize, reason: String },

    #[error("invalid string length prefix at byte {0}")]
    InvalidStringLength(usize),

    #[error("unexpected byte {byte:#04x} at byte {position}")]
    UnexpectedByte { byte: u8, position: usize },

    #[error("dictionary key must be a byte string (byte {0})")]
    NonStringKey(usize),

    #[error("dictionary keys out of order or duplicated at byte {0}")]
    UnsortedKeys(usize),

    #[error("trailing data after value at byte {0}")]
    TrailingData(usize),

    #[error("nesting too deep at byte {0}")]
    NestingTooDeep(usize),
}
