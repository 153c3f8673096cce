//! DHCP message serialization module.

use bytes::{BufMut, Bytes, BytesMut};
use eui48::EUI48LEN;

use crate::{
    constants::*,
    error::Error,
    message::{Message, OptionKey},
    registry::RegistryChain,
};

impl Message {
    /// DHCP message serialization.
    ///
    /// Fixed-width fields shorter than their slot are zero-padded. Options
    /// held under semantic names are resolved through `chain`; options held
    /// under raw numeric codes are emitted as stored without consulting any
    /// registry. The magic cookie and the end marker are always appended.
    ///
    /// # Errors
    /// `Error::FieldTooLarge` if `server_name`, `boot_filename` or an
    /// option body overflows its wire slot.
    /// `Error::UnknownOptionName` if an option name resolves through no
    /// registry in the chain.
    pub fn to_bytes(&self, chain: &RegistryChain) -> Result<Bytes, Error> {
        check_width("server_name", self.server_name.len(), SIZE_SERVER_NAME)?;
        check_width("boot_filename", self.boot_filename.len(), SIZE_BOOT_FILENAME)?;

        let mut dst = BytesMut::with_capacity(SIZE_MESSAGE_MINIMAL);
        dst.put_u8(self.operation_code as u8);
        dst.put_u8(self.hardware_type);
        dst.put_u8(self.hardware_address_length);
        dst.put_u8(self.hops);
        dst.put_u32(self.transaction_id);
        dst.put_u16(self.seconds);
        dst.put_u16(self.flags);
        dst.put_u32(u32::from(self.client_ip_address));
        dst.put_u32(u32::from(self.your_ip_address));
        dst.put_u32(u32::from(self.server_ip_address));
        dst.put_u32(u32::from(self.gateway_ip_address));
        dst.put_slice(self.client_hardware_address.as_bytes()); // 6 byte MAC-48
        dst.put_bytes(0, SIZE_HARDWARE_ADDRESS - EUI48LEN); // 10 byte padding
        put_fixed_string(&mut dst, &self.server_name, SIZE_SERVER_NAME);
        put_fixed_string(&mut dst, &self.boot_filename, SIZE_BOOT_FILENAME);
        dst.put_slice(&MAGIC_COOKIE);

        for (key, value) in self.options.iter() {
            let code = match key {
                OptionKey::Name(name) => chain.by_name(name)?.code,
                OptionKey::Code(code) => *code,
            };
            let length = value.wire_len();
            if length > SIZE_OPTION_MAX {
                return Err(Error::FieldTooLarge {
                    field: format!("option {}", key),
                    actual: length,
                    max: SIZE_OPTION_MAX,
                });
            }
            dst.put_u8(code);
            dst.put_u8(length as u8);
            value.encode(&mut dst);
        }
        dst.put_u8(TAG_END);

        Ok(dst.freeze())
    }
}

fn check_width(field: &str, actual: usize, max: usize) -> Result<(), Error> {
    if actual > max {
        return Err(Error::FieldTooLarge {
            field: field.to_owned(),
            actual,
            max,
        });
    }
    Ok(())
}

/// Writes a string into a NUL-padded fixed-width field.
fn put_fixed_string(dst: &mut BytesMut, value: &str, width: usize) {
    dst.put_slice(value.as_bytes());
    dst.put_bytes(0, width - value.len());
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use eui48::MacAddress;

    use super::*;
    use crate::{
        message::{OperationCode, Options},
        value::Value,
    };

    #[test]
    fn round_trips_through_the_wire_format() {
        let chain = RegistryChain::default();

        let mut options = Options::new();
        options.insert("message-type", 2u8);
        options.insert("subnet-mask", Ipv4Addr::new(255, 255, 255, 0));
        options.insert(
            "routers",
            vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 254)],
        );
        options.insert("lease-time", 86400u32);
        options.insert("parameter-request-list", vec![1u8, 3, 15, 6]);
        options.insert_code(43, Value::Raw(vec![0xca, 0xfe]));

        let message = Message {
            operation_code: OperationCode::BootReply,
            hardware_type: 1,
            hardware_address_length: 6,
            hops: 1,
            transaction_id: 0x3903_f326,
            seconds: 7,
            flags: FLAG_BROADCAST,
            client_ip_address: Ipv4Addr::UNSPECIFIED,
            your_ip_address: Ipv4Addr::new(192, 168, 1, 100),
            server_ip_address: Ipv4Addr::new(192, 168, 1, 1),
            gateway_ip_address: Ipv4Addr::UNSPECIFIED,
            client_hardware_address: MacAddress::new([0x00, 0x05, 0x3c, 0x04, 0x8d, 0x59]),
            server_name: "gateway".to_owned(),
            boot_filename: "pxe/boot0".to_owned(),
            options,
        };

        let encoded = message.to_bytes(&chain).unwrap();
        let decoded = Message::from_bytes(&encoded, &chain).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn lays_the_header_out_at_fixed_offsets() {
        let chain = RegistryChain::default();
        let message = empty_message();

        let encoded = message.to_bytes(&chain).unwrap();
        assert_eq!(encoded[0], 1);
        assert_eq!(&encoded[4..8], &[0x39, 0x03, 0xf3, 0x26]);
        assert_eq!(
            &encoded[28..34],
            message.client_hardware_address.as_bytes(),
        );
        assert_eq!(&encoded[34..44], &[0u8; 10][..]);
        assert_eq!(&encoded[OFFSET_MAGIC_COOKIE..OFFSET_OPTIONS], &MAGIC_COOKIE);
        assert_eq!(encoded[encoded.len() - 1], TAG_END);
    }

    #[test]
    fn unresolved_codes_encode_without_any_registry() {
        let chain = RegistryChain::empty();

        let mut message = empty_message();
        message.options.insert_code(43, Value::Raw(vec![0xca, 0xfe]));
        message.options.insert_code(224, Value::Raw(vec![1]));

        let encoded = message.to_bytes(&chain).unwrap();
        let decoded = Message::from_bytes(&encoded, &chain).unwrap();
        assert_eq!(decoded.options.get_code(43), Some(&Value::Raw(vec![0xca, 0xfe])));
        assert_eq!(decoded.options.get_code(224), Some(&Value::Raw(vec![1])));
    }

    #[test]
    fn unknown_option_names_fail_synchronously() {
        let chain = RegistryChain::default();

        let mut message = empty_message();
        message.options.insert("no-such-option", 1u8);

        let result = message.to_bytes(&chain);
        assert!(matches!(result, Err(Error::UnknownOptionName(_))));
    }

    #[test]
    fn oversized_fixed_fields_are_a_configuration_error() {
        let chain = RegistryChain::default();

        let mut message = empty_message();
        message.server_name = "x".repeat(SIZE_SERVER_NAME + 1);

        let result = message.to_bytes(&chain);
        assert!(matches!(result, Err(Error::FieldTooLarge { .. })));
    }

    #[test]
    fn oversized_option_bodies_are_a_configuration_error() {
        let chain = RegistryChain::default();

        let mut message = empty_message();
        message
            .options
            .insert("routers", vec![Ipv4Addr::new(10, 0, 0, 1); 64]); // 256 bytes

        let result = message.to_bytes(&chain);
        assert!(matches!(result, Err(Error::FieldTooLarge { .. })));
    }

    fn empty_message() -> Message {
        Message {
            operation_code: OperationCode::BootRequest,
            hardware_type: 1,
            hardware_address_length: 6,
            hops: 0,
            transaction_id: 0x3903_f326,
            seconds: 0,
            flags: 0,
            client_ip_address: Ipv4Addr::UNSPECIFIED,
            your_ip_address: Ipv4Addr::UNSPECIFIED,
            server_ip_address: Ipv4Addr::UNSPECIFIED,
            gateway_ip_address: Ipv4Addr::UNSPECIFIED,
            client_hardware_address: MacAddress::new([0x00, 0x05, 0x3c, 0x04, 0x8d, 0x59]),
            server_name: String::new(),
            boot_filename: String::new(),
            options: Options::new(),
        }
    }
}
