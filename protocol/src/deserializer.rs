//! DHCP message deserialization module.

use std::net::Ipv4Addr;

use bytes::Buf;
use eui48::{MacAddress, EUI48LEN};

use crate::{
    constants::*,
    error::Error,
    message::{Message, Options},
    registry::RegistryChain,
    value::Value,
};

impl Message {
    /// DHCP message deserialization.
    ///
    /// The fixed BOOTP header is mandatory. The options area is parsed
    /// only when the magic cookie follows the header, so plain BOOTP
    /// packets decode to a message with an empty options mapping. Tags
    /// the chain does not resolve are preserved verbatim under their
    /// numeric code; a repeated tag keeps its last occurrence.
    ///
    /// # Errors
    /// `Error::TooShort` if the fixed header is incomplete.
    /// `Error::MalformedOption` if a TLV entry is truncated or its value
    /// bytes do not decode as the registered type.
    pub fn from_bytes(src: &[u8], chain: &RegistryChain) -> Result<Self, Error> {
        if src.len() < OFFSET_MAGIC_COOKIE {
            return Err(Error::TooShort {
                actual: src.len(),
                expected: OFFSET_MAGIC_COOKIE,
            });
        }

        let mut cursor = src;
        let operation_code = cursor.get_u8().into();
        let hardware_type = cursor.get_u8();
        let hardware_address_length = cursor.get_u8();
        let hops = cursor.get_u8();
        let transaction_id = cursor.get_u32();
        let seconds = cursor.get_u16();
        let flags = cursor.get_u16();
        let client_ip_address = Ipv4Addr::from(cursor.get_u32());
        let your_ip_address = Ipv4Addr::from(cursor.get_u32());
        let server_ip_address = Ipv4Addr::from(cursor.get_u32());
        let gateway_ip_address = Ipv4Addr::from(cursor.get_u32());

        let client_hardware_address = {
            let mut octets = [0u8; EUI48LEN];
            cursor.copy_to_slice(&mut octets);
            // the MAC-48 is zero-padded to the 16-byte field
            cursor.advance(SIZE_HARDWARE_ADDRESS - EUI48LEN);
            MacAddress::new(octets)
        };

        let server_name = read_fixed_string(&mut cursor, SIZE_SERVER_NAME);
        let boot_filename = read_fixed_string(&mut cursor, SIZE_BOOT_FILENAME);

        let mut options = Options::new();
        if cursor.len() >= SIZE_MAGIC_COOKIE && cursor[..SIZE_MAGIC_COOKIE] == MAGIC_COOKIE {
            cursor.advance(SIZE_MAGIC_COOKIE);
            read_options(cursor, chain, &mut options)?;
        }

        Ok(Message {
            operation_code,
            hardware_type,
            hardware_address_length,
            hops,
            transaction_id,
            seconds,
            flags,
            client_ip_address,
            your_ip_address,
            server_ip_address,
            gateway_ip_address,
            client_hardware_address,
            server_name,
            boot_filename,
            options,
        })
    }
}

/// Reads a NUL-padded fixed-width string field.
fn read_fixed_string(cursor: &mut &[u8], width: usize) -> String {
    let raw = &cursor[..width];
    let end = raw.iter().rposition(|&byte| byte != 0).map_or(0, |last| last + 1);
    let text = String::from_utf8_lossy(&raw[..end]).into_owned();
    cursor.advance(width);
    text
}

/// Walks the TLV stream until the end tag or the end of the buffer.
fn read_options(
    mut cursor: &[u8],
    chain: &RegistryChain,
    options: &mut Options,
) -> Result<(), Error> {
    while cursor.has_remaining() {
        let tag = cursor.get_u8();
        if tag == TAG_PAD {
            continue;
        }
        if tag == TAG_END {
            break;
        }

        if !cursor.has_remaining() {
            return Err(Error::MalformedOption {
                tag,
                reason: "length octet is missing",
            });
        }
        let length = cursor.get_u8() as usize;
        if cursor.remaining() < length {
            return Err(Error::MalformedOption {
                tag,
                reason: "declared length runs past the end of the datagram",
            });
        }

        let body = &cursor[..length];
        match chain.by_code(tag) {
            Some(spec) => options.insert(spec.name, spec.value_type.decode(tag, body)?),
            None => options.insert_code(tag, Value::Raw(body.to_vec())),
        }
        cursor.advance(length);
    }

    Ok(())
}
