//! Ordering-preserving tuple encoding for store keys.
//!
//! A subset of the FoundationDB tuple layer: null, byte strings, UTF-8 strings
//! and integers. Packed tuples compare bytewise in the same order as the
//! values they encode, which is what makes geohash codes usable as scan
//! boundaries.

use crate::error::{GeoRangeError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

const NULL_CODE: u8 = 0x00;
const BYTES_CODE: u8 = 0x01;
const STRING_CODE: u8 = 0x02;
const INT_ZERO_CODE: u8 = 0x14;
const ESCAPE: u8 = 0xff;

/// One element of a packed tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TupleElement {
    Null,
    Bytes(Bytes),
    String(String),
    Int(i64),
    /// Non-negative integers above `i64::MAX`.
    Uint(u64),
}

impl TupleElement {
    /// Returns the value as `u64` for integer elements.
    pub fn as_u64(&self) -> Option<std::result::Result<u64, i64>> {
        match *self {
            TupleElement::Uint(v) => Some(Ok(v)),
            TupleElement::Int(v) => Some(u64::try_from(v).map_err(|_| v)),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TupleElement::Int(_) | TupleElement::Uint(_))
    }
}

impl From<u64> for TupleElement {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => TupleElement::Int(v),
            Err(_) => TupleElement::Uint(v),
        }
    }
}

impl From<i64> for TupleElement {
    fn from(v: i64) -> Self {
        TupleElement::Int(v)
    }
}

impl From<&str> for TupleElement {
    fn from(v: &str) -> Self {
        TupleElement::String(v.to_owned())
    }
}

impl From<String> for TupleElement {
    fn from(v: String) -> Self {
        TupleElement::String(v)
    }
}

impl From<&[u8]> for TupleElement {
    fn from(v: &[u8]) -> Self {
        TupleElement::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<Bytes> for TupleElement {
    fn from(v: Bytes) -> Self {
        TupleElement::Bytes(v)
    }
}

impl fmt::Display for TupleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TupleElement::Null => write!(f, "null"),
            TupleElement::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            TupleElement::String(s) => write!(f, "{:?}", s),
            TupleElement::Int(v) => write!(f, "{}", v),
            TupleElement::Uint(v) => write!(f, "{}", v),
        }
    }
}

/// Pack a tuple into its ordered byte encoding.
///
/// # Examples
///
/// ```
/// use georange::tuple::{pack, unpack, TupleElement};
///
/// let key = pack(&["cities".into(), TupleElement::from(42u64)]);
/// assert_eq!(unpack(&key).unwrap()[1], TupleElement::Int(42));
/// ```
pub fn pack(elements: &[TupleElement]) -> Bytes {
    let mut buf = BytesMut::new();
    for element in elements {
        encode_element(&mut buf, element);
    }
    buf.freeze()
}

/// Append the encoding of a single unsigned integer to `buf`.
pub fn pack_u64_into(buf: &mut BytesMut, value: u64) {
    encode_uint(buf, value);
}

/// Unpack a byte string produced by [`pack`].
pub fn unpack(key: &[u8]) -> Result<Vec<TupleElement>> {
    let mut elements = Vec::new();
    let mut pos = 0;
    while pos < key.len() {
        let (element, next) = decode_element(key, pos)?;
        elements.push(element);
        pos = next;
    }
    Ok(elements)
}

/// Read the unsigned integer at `index` of a packed key.
///
/// A negative `index` counts from the end, so `-1` is the last element.
///
/// # Errors
///
/// - `MalformedKey` if the key does not unpack
/// - `IndexOutOfRange` if the adjusted index is outside the tuple
/// - `NotAnInteger` if the element is not an integer
/// - `IntegerOutOfRange` if the element is a negative integer
///
/// # Examples
///
/// ```
/// use georange::tuple::{pack, unpack_uint};
///
/// let key = pack(&["places".into(), 7u64.into(), 0x9bd3u64.into()]);
/// assert_eq!(unpack_uint(&key, -1).unwrap(), 0x9bd3);
/// assert_eq!(unpack_uint(&key, 1).unwrap(), 7);
/// assert!(unpack_uint(&key, 0).is_err());
/// ```
pub fn unpack_uint(key: &[u8], index: isize) -> Result<u64> {
    let elements = unpack(key)?;
    let len = elements.len();

    let adjusted = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if adjusted < 0 || adjusted as usize >= len {
        return Err(GeoRangeError::IndexOutOfRange { index, len });
    }

    let position = adjusted as usize;
    match elements[position].as_u64() {
        Some(Ok(value)) => Ok(value),
        Some(Err(value)) => Err(GeoRangeError::IntegerOutOfRange { value }),
        None => Err(GeoRangeError::NotAnInteger { index: position }),
    }
}

fn encode_element(buf: &mut BytesMut, element: &TupleElement) {
    match element {
        TupleElement::Null => buf.put_u8(NULL_CODE),
        TupleElement::Bytes(b) => encode_escaped(buf, BYTES_CODE, b),
        TupleElement::String(s) => encode_escaped(buf, STRING_CODE, s.as_bytes()),
        TupleElement::Int(v) if *v >= 0 => encode_uint(buf, v.unsigned_abs()),
        TupleElement::Int(v) => encode_negative(buf, v.unsigned_abs()),
        TupleElement::Uint(v) => encode_uint(buf, *v),
    }
}

fn encode_escaped(buf: &mut BytesMut, code: u8, data: &[u8]) {
    buf.put_u8(code);
    for &byte in data {
        buf.put_u8(byte);
        if byte == 0x00 {
            buf.put_u8(ESCAPE);
        }
    }
    buf.put_u8(0x00);
}

fn byte_len(value: u64) -> usize {
    (64 - value.leading_zeros() as usize).div_ceil(8)
}

fn encode_uint(buf: &mut BytesMut, value: u64) {
    let len = byte_len(value);
    buf.put_u8(INT_ZERO_CODE + len as u8);
    buf.put_slice(&value.to_be_bytes()[8 - len..]);
}

/// Negative values store the one's complement of their magnitude.
fn encode_negative(buf: &mut BytesMut, magnitude: u64) {
    let len = byte_len(magnitude);
    buf.put_u8(INT_ZERO_CODE - len as u8);
    buf.put_slice(&(!magnitude).to_be_bytes()[8 - len..]);
}

fn decode_element(key: &[u8], pos: usize) -> Result<(TupleElement, usize)> {
    let code = key[pos];
    match code {
        NULL_CODE => Ok((TupleElement::Null, pos + 1)),
        BYTES_CODE => {
            let (data, next) = decode_escaped(key, pos + 1)?;
            Ok((TupleElement::Bytes(Bytes::from(data)), next))
        }
        STRING_CODE => {
            let (data, next) = decode_escaped(key, pos + 1)?;
            let s = String::from_utf8(data)
                .map_err(|e| GeoRangeError::MalformedKey(format!("invalid UTF-8 string: {}", e)))?;
            Ok((TupleElement::String(s), next))
        }
        0x0c..=0x1c => decode_int(key, pos),
        other => Err(GeoRangeError::MalformedKey(format!(
            "unsupported type code {:#04x} at offset {}",
            other, pos
        ))),
    }
}

fn decode_escaped(key: &[u8], mut pos: usize) -> Result<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    while pos < key.len() {
        let byte = key[pos];
        if byte == 0x00 {
            if key.get(pos + 1) == Some(&ESCAPE) {
                out.push(0x00);
                pos += 2;
                continue;
            }
            return Ok((out, pos + 1));
        }
        out.push(byte);
        pos += 1;
    }
    Err(GeoRangeError::MalformedKey(
        "unterminated byte string".to_string(),
    ))
}

fn decode_int(key: &[u8], pos: usize) -> Result<(TupleElement, usize)> {
    let code = key[pos];
    let len = usize::from(code.abs_diff(INT_ZERO_CODE));
    let start = pos + 1;
    let end = start + len;
    let raw = key.get(start..end).ok_or_else(|| {
        GeoRangeError::MalformedKey(format!("truncated integer at offset {}", pos))
    })?;

    let mut word = [0u8; 8];
    word[8 - len..].copy_from_slice(raw);
    let value = u64::from_be_bytes(word);

    let element = if code >= INT_ZERO_CODE {
        TupleElement::from(value)
    } else {
        let mask = u64::MAX.checked_shr(64 - 8 * len as u32).unwrap_or(0);
        let magnitude = mask - value;
        match magnitude {
            m if m < 1 << 63 => TupleElement::Int(-(m as i64)),
            m if m == 1 << 63 => TupleElement::Int(i64::MIN),
            m => {
                return Err(GeoRangeError::MalformedKey(format!(
                    "negative integer magnitude {} exceeds i64",
                    m
                )));
            }
        }
    };
    Ok((element, end))
}
