use bytes::Bytes;
use std::collections::BTreeMap;
use tracing::debug;

use super::bvalue::BValue;
use super::error::BencodeError;

const MAX_DEPTH: usize = 64;

/// Decodes a complete buffer, rejecting anything left over after the value.
pub fn decode(input: &[u8]) -> Result<BValue, BencodeError> {
    let (value, consumed) = decode_prefix(input)?;
    if consumed != input.len() {
        return Err(BencodeError::TrailingData(consumed));
    }
    Ok(value)
}

/// Decodes the first value in `input`, returning it with the number of bytes it spans.
pub fn decode_prefix(input: &[u8]) -> Result<(BValue, usize), BencodeError> {
    let mut decoder = Decoder::new(input);
    let value = decoder.parse()?;
    Ok((value, decoder.position()))
}

pub struct Decoder<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    pub fn parse(&mut self) -> Result<BValue, BencodeError> {
        self.parse_value(0)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn consume_until(&mut self, delimiter: u8) -> Result<&'a [u8], BencodeError> {
        let start = self.position;
        let len = self.input[start..]
            .iter()
            .position(|&b| b == delimiter)
            .ok_or(BencodeError::UnexpectedEof(self.input.len()))?;
        self.position = start + len + 1; // skip the delimiter
        Ok(&self.input[start..start + len])
    }

    fn parse_value(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        if depth > MAX_DEPTH {
            return Err(BencodeError::NestingTooDeep(self.position));
        }
        match self.peek_byte() {
            Some(b'i') => Ok(BValue::Integer(self.parse_integer()?)),
            Some(b'l') => self.parse_list(depth),
            Some(b'd') => self.parse_dict(depth),
            Some(b'0'..=b'9') => Ok(BValue::String(self.parse_string()?)),
            Some(byte) => {
                debug!(
                    "Unhandled encoded value at position {}: {:#04x}",
                    self.position, byte
                );
                Err(BencodeError::UnexpectedByte {
                    byte,
                    position: self.position,
                })
            }
            None => Err(BencodeError::UnexpectedEof(self.position)),
        }
    }

    fn parse_integer(&mut self) -> Result<i64, BencodeError> {
        self.position += 1; // consume 'i'
        let start = self.position;
        let digits = self.consume_until(b'e')?;
        let invalid = |reason: &str| BencodeError::InvalidInteger {
            position: start,
            reason: reason.to_string(),
        };

        let unsigned = digits.strip_prefix(b"-").unwrap_or(digits);
        if unsigned.is_empty() {
            return Err(invalid("no digits"));
        }
        if !unsigned.iter().all(u8::is_ascii_digit) {
            return Err(invalid("non-digit character"));
        }
        if unsigned[0] == b'0' && (unsigned.len() > 1 || unsigned.len() != digits.len()) {
            return Err(invalid("leading zero"));
        }

        // Only ASCII digits and an optional '-' remain, so this is valid UTF-8.
        let text = std::str::from_utf8(digits).map_err(|_| invalid("not ascii"))?;
        text.parse::<i64>().map_err(|_| invalid("out of range"))
    }

    fn parse_string(&mut self) -> Result<Bytes, BencodeError> {
        let start = self.position;
        let len_digits = self.consume_until(b':')?;
        if len_digits.is_empty() || !len_digits.iter().all(u8::is_ascii_digit) {
            return Err(BencodeError::InvalidStringLength(start));
        }
        // `04:` would re-encode as `4:` and change the info-hash.
        if len_digits.len() > 1 && len_digits[0] == b'0' {
            return Err(BencodeError::InvalidStringLength(start));
        }
        let len = std::str::from_utf8(len_digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(BencodeError::InvalidStringLength(start))?;

        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(BencodeError::UnexpectedEof(self.input.len()))?;
        let string = Bytes::copy_from_slice(&self.input[self.position..end]);
        self.position = end;
        Ok(string)
    }

    fn parse_list(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        self.position += 1; // consume 'l'
        let mut values = Vec::new();

        loop {
            match self.peek_byte() {
                Some(b'e') => {
                    self.position += 1;
                    return Ok(BValue::List(values));
                }
                Some(_) => values.push(self.parse_value(depth + 1)?),
                None => return Err(BencodeError::UnexpectedEof(self.position)),
            }
        }
    }

    fn parse_dict(&mut self, depth: usize) -> Result<BValue, BencodeError> {
        self.position += 1; // consume 'd'
        let mut map = BTreeMap::new();
        let mut last_key: Option<Bytes> = None;

        loop {
            match self.peek_byte() {
                Some(b'e') => {
                    self.position += 1;
                    return Ok(BValue::Dict(map));
                }
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(BencodeError::NonStringKey(self.position)),
                None => return Err(BencodeError::UnexpectedEof(self.position)),
            }

            let key_position = self.position;
            let key = self.parse_string()?;
            // Re-encoding walks the map in byte order, so anything else would not round-trip.
            if last_key.as_ref().is_some_and(|last| *last >= key) {
                return Err(BencodeError::UnsortedKeys(key_position));
            }
            let value = self.parse_value(depth + 1)?;
            last_key = Some(key.clone());
            map.insert(key, value);
        }
    }
}
