//! Option value types and their codecs.

use std::{fmt, net::Ipv4Addr};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::Error;

/// The wire shape of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// One unsigned byte.
    Byte,
    /// Big-endian 16-bit unsigned integer.
    U16,
    /// Big-endian 32-bit unsigned integer.
    U32,
    /// Exactly four octets.
    Ipv4,
    /// A positive multiple of four octets.
    Ipv4List,
    /// Text, no arity constraint.
    Ascii,
    /// Passthrough bytes, used for codes with no registered type.
    Raw,
}

/// A decoded option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Byte(u8),
    U16(u16),
    U32(u32),
    Ipv4(Ipv4Addr),
    Ipv4List(Vec<Ipv4Addr>),
    Ascii(String),
    Raw(Vec<u8>),
}

/// Checks that a fixed-width type got exactly its width.
macro_rules! check_length(
    ($tag:expr, $len:expr, $correct:expr) => (
        if $len != $correct {
            return Err(Error::MalformedOption {
                tag: $tag,
                reason: "length octet does not match the value type width",
            });
        }
    );
);

impl ValueType {
    /// Decodes `src` as a value of this type.
    ///
    /// # Errors
    /// `Error::MalformedOption` if the byte length does not satisfy the
    /// arity of the type: the exact width for the fixed types, a positive
    /// multiple of four for address lists.
    pub fn decode(self, tag: u8, src: &[u8]) -> Result<Value, Error> {
        let mut src = src;
        Ok(match self {
            ValueType::Byte => {
                check_length!(tag, src.len(), 1);
                Value::Byte(src.get_u8())
            }
            ValueType::U16 => {
                check_length!(tag, src.len(), 2);
                Value::U16(src.get_u16())
            }
            ValueType::U32 => {
                check_length!(tag, src.len(), 4);
                Value::U32(src.get_u32())
            }
            ValueType::Ipv4 => {
                check_length!(tag, src.len(), 4);
                Value::Ipv4(Ipv4Addr::from(src.get_u32()))
            }
            ValueType::Ipv4List => {
                if src.is_empty() || src.len() % 4 != 0 {
                    return Err(Error::MalformedOption {
                        tag,
                        reason: "address list length is not a positive multiple of four",
                    });
                }
                let mut list = Vec::with_capacity(src.len() / 4);
                while src.has_remaining() {
                    list.push(Ipv4Addr::from(src.get_u32()));
                }
                Value::Ipv4List(list)
            }
            ValueType::Ascii => Value::Ascii(String::from_utf8_lossy(src).into_owned()),
            ValueType::Raw => Value::Raw(src.to_vec()),
        })
    }
}

impl Value {
    /// The number of bytes the value occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            Value::Byte(_) => 1,
            Value::U16(_) => 2,
            Value::U32(_) | Value::Ipv4(_) => 4,
            Value::Ipv4List(list) => list.len() * 4,
            Value::Ascii(text) => text.len(),
            Value::Raw(bytes) => bytes.len(),
        }
    }

    /// Serializes the value. Total for any well-typed value.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            Value::Byte(value) => dst.put_u8(*value),
            Value::U16(value) => dst.put_u16(*value),
            Value::U32(value) => dst.put_u32(*value),
            Value::Ipv4(address) => dst.put_u32(u32::from(*address)),
            Value::Ipv4List(list) => {
                for address in list.iter() {
                    dst.put_u32(u32::from(*address));
                }
            }
            Value::Ascii(text) => dst.put_slice(text.as_bytes()),
            Value::Raw(bytes) => dst.put_slice(bytes),
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Byte(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U16(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(address: Ipv4Addr) -> Self {
        Value::Ipv4(address)
    }
}

impl From<Vec<Ipv4Addr>> for Value {
    fn from(list: Vec<Ipv4Addr>) -> Self {
        Value::Ipv4List(list)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Ascii(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Ascii(text)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Raw(bytes)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Byte(value) => write!(f, "{}", value),
            Value::U16(value) => write!(f, "{}", value),
            Value::U32(value) => write!(f, "{}", value),
            Value::Ipv4(address) => write!(f, "{}", address),
            Value::Ipv4List(list) => {
                let mut first = true;
                for address in list.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", address)?;
                    first = false;
                }
                Ok(())
            }
            Value::Ascii(text) => write!(f, "{}", text),
            Value::Raw(bytes) => write!(f, "{:?}", bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_fixed_width_types() {
        assert_eq!(
            ValueType::Byte.decode(53, &[1]).unwrap(),
            Value::Byte(1),
        );
        assert_eq!(
            ValueType::U16.decode(57, &[0x02, 0x40]).unwrap(),
            Value::U16(576),
        );
        assert_eq!(
            ValueType::U32.decode(51, &[0x00, 0x01, 0x51, 0x80]).unwrap(),
            Value::U32(86400),
        );
        assert_eq!(
            ValueType::Ipv4.decode(1, &[255, 255, 255, 0]).unwrap(),
            Value::Ipv4(Ipv4Addr::new(255, 255, 255, 0)),
        );
    }

    #[test]
    fn rejects_wrong_fixed_width() {
        assert!(ValueType::Byte.decode(53, &[]).is_err());
        assert!(ValueType::Byte.decode(53, &[1, 2]).is_err());
        assert!(ValueType::U16.decode(57, &[1]).is_err());
        assert!(ValueType::U32.decode(51, &[1, 2, 3]).is_err());
        assert!(ValueType::Ipv4.decode(1, &[192, 168, 0]).is_err());
    }

    #[test]
    fn decodes_address_lists() {
        assert_eq!(
            ValueType::Ipv4List
                .decode(3, &[192, 168, 0, 1, 10, 0, 0, 1])
                .unwrap(),
            Value::Ipv4List(vec![
                Ipv4Addr::new(192, 168, 0, 1),
                Ipv4Addr::new(10, 0, 0, 1),
            ]),
        );
    }

    #[test]
    fn rejects_bad_address_lists() {
        assert!(ValueType::Ipv4List.decode(3, &[]).is_err());
        assert!(ValueType::Ipv4List.decode(3, &[192, 168, 0, 1, 10]).is_err());
    }

    #[test]
    fn text_and_raw_take_any_length() {
        assert_eq!(
            ValueType::Ascii.decode(12, b"host").unwrap(),
            Value::Ascii("host".to_owned()),
        );
        assert_eq!(ValueType::Ascii.decode(12, b"").unwrap(), Value::Ascii(String::new()));
        assert_eq!(
            ValueType::Raw.decode(55, &[1, 3, 15, 6]).unwrap(),
            Value::Raw(vec![1, 3, 15, 6]),
        );
    }

    #[test]
    fn encodes_to_its_wire_length() {
        let values = vec![
            Value::Byte(2),
            Value::U16(1500),
            Value::U32(86400),
            Value::Ipv4(Ipv4Addr::new(192, 168, 0, 1)),
            Value::Ipv4List(vec![Ipv4Addr::new(9, 7, 10, 15), Ipv4Addr::new(9, 7, 10, 16)]),
            Value::Ascii("example.org".to_owned()),
            Value::Raw(vec![1, 3, 15, 6]),
        ];

        for value in values {
            let mut dst = BytesMut::new();
            value.encode(&mut dst);
            assert_eq!(dst.len(), value.wire_len());
        }
    }
}
