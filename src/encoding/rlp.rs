//! Recursive Length Prefix encoding
//!
//! Flow hashes and signs the RLP encoding of a transaction's canonical form.
//! Encoding rules per node:
//! - a single byte below `0x80` is its own encoding
//! - a byte string of 0-55 bytes is `0x80 + len` followed by the bytes
//! - a longer byte string is `0xb7 + len_of_len`, the big-endian length, the bytes
//! - lists use the same scheme with base `0xc0` / `0xf7`, and their payload is
//!   the concatenation of the children's encodings
//!
//! Unsigned integers are byte strings of their minimal big-endian form, so
//! zero is the empty string. Negative values have no representation here.

use crate::error::FlowError;

/// Largest payload that still fits a single prefix byte
const SHORT_LIMIT: usize = 55;

const STRING_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;

/// A node in an RLP tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(bytes.into())
    }

    /// Minimal big-endian representation of an unsigned integer
    pub fn uint(value: u64) -> Self {
        let be = value.to_be_bytes();
        let leading_zeros = be.iter().take_while(|&&b| b == 0).count();
        RlpItem::Bytes(be[leading_zeros..].to_vec())
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = RlpItem>,
    {
        RlpItem::List(items.into_iter().collect())
    }

    pub fn empty_list() -> Self {
        RlpItem::List(Vec::new())
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(b) => Some(b),
            RlpItem::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Interpret a byte string as a big-endian unsigned integer
    pub fn as_u64(&self) -> Option<u64> {
        let bytes = self.as_bytes()?;
        if bytes.len() > 8 || bytes.first() == Some(&0) {
            return None;
        }
        Some(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }
}

impl From<u64> for RlpItem {
    fn from(value: u64) -> Self {
        RlpItem::uint(value)
    }
}

impl From<u32> for RlpItem {
    fn from(value: u32) -> Self {
        RlpItem::uint(value as u64)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<&str> for RlpItem {
    fn from(s: &str) -> Self {
        RlpItem::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

/// Errors raised while decoding RLP input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RlpError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),

    #[error("Non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("Length does not fit in usize")]
    LengthOverflow,

    #[error("Lists nested deeper than {0}")]
    TooDeep(usize),
}

impl From<RlpError> for FlowError {
    fn from(e: RlpError) -> Self {
        FlowError::parse_error(format!("RLP decode failed: {}", e))
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode an item tree
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < STRING_OFFSET {
                out.push(bytes[0]);
            } else {
                encode_header(bytes.len(), STRING_OFFSET, out);
                out.extend_from_slice(bytes);
            }
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for child in items {
                encode_into(child, &mut payload);
            }
            encode_header(payload.len(), LIST_OFFSET, out);
            out.extend_from_slice(&payload);
        }
    }
}

fn encode_header(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= SHORT_LIMIT {
        out.push(offset + len as u8);
    } else {
        let len_bytes = encode_length(len);
        out.push(offset + SHORT_LIMIT as u8 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    bytes[leading_zeros..].to_vec()
}

// =============================================================================
// Decoding
// =============================================================================

/// Deepest list nesting `decode` accepts. Flow messages nest at most three deep.
pub const MAX_DEPTH: usize = 64;

/// Decode exactly one item; trailing input is an error
pub fn decode(input: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_item(input, 0)?;
    if consumed != input.len() {
        return Err(RlpError::TrailingBytes(input.len() - consumed));
    }
    Ok(item)
}

fn decode_item(input: &[u8], depth: usize) -> Result<(RlpItem, usize), RlpError> {
    let prefix = *input.first().ok_or(RlpError::UnexpectedEnd)?;
    if prefix >= LIST_OFFSET && depth >= MAX_DEPTH {
        return Err(RlpError::TooDeep(MAX_DEPTH));
    }

    match prefix {
        0x00..=0x7f => Ok((RlpItem::Bytes(vec![prefix]), 1)),
        0x80..=0xb7 => {
            let len = (prefix - STRING_OFFSET) as usize;
            let body = take(input, 1, len)?;
            if len == 1 && body[0] < STRING_OFFSET {
                return Err(RlpError::NonCanonical("single byte below 0x80 with prefix"));
            }
            Ok((RlpItem::Bytes(body.to_vec()), 1 + len))
        }
        0xb8..=0xbf => {
            let len_of_len = (prefix - 0xb7) as usize;
            let len = read_long_length(input, len_of_len)?;
            let body = take(input, 1 + len_of_len, len)?;
            Ok((RlpItem::Bytes(body.to_vec()), 1 + len_of_len + len))
        }
        0xc0..=0xf7 => {
            let len = (prefix - LIST_OFFSET) as usize;
            let payload = take(input, 1, len)?;
            Ok((RlpItem::List(decode_list_payload(payload, depth + 1)?), 1 + len))
        }
        0xf8..=0xff => {
            let len_of_len = (prefix - 0xf7) as usize;
            let len = read_long_length(input, len_of_len)?;
            let payload = take(input, 1 + len_of_len, len)?;
            Ok((
                RlpItem::List(decode_list_payload(payload, depth + 1)?),
                1 + len_of_len + len,
            ))
        }
    }
}

fn decode_list_payload(mut payload: &[u8], depth: usize) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, consumed) = decode_item(payload, depth)?;
        items.push(item);
        payload = &payload[consumed..];
    }
    Ok(items)
}

fn read_long_length(input: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    let len_bytes = take(input, 1, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("length with leading zero"));
    }
    let len = len_bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len <= SHORT_LIMIT {
        return Err(RlpError::NonCanonical("long form used for short payload"));
    }
    Ok(len)
}

fn take(input: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow)?;
    input.get(start..end).ok_or(RlpError::UnexpectedEnd)
}
