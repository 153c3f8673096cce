//! The main DHCP message module.

use std::{collections::BTreeMap, fmt, net::Ipv4Addr};

use eui48::MacAddress;

use crate::{constants::FLAG_BROADCAST, value::Value};

/// DHCP opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCode {
    Undefined = 0,
    BootRequest,
    BootReply,
}

impl From<u8> for OperationCode {
    fn from(value: u8) -> Self {
        use self::OperationCode::*;
        match value {
            1 => BootRequest,
            2 => BootReply,

            _ => Undefined,
        }
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::OperationCode::*;
        match self {
            BootRequest => write!(f, "BOOTREQUEST"),
            BootReply => write!(f, "BOOTREPLY"),

            Undefined => write!(f, "UNDEFINED"),
        }
    }
}

/// DHCP message type (RFC 2131 only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Undefined = 0,
    DhcpDiscover,
    DhcpOffer,
    DhcpRequest,
    DhcpDecline,
    DhcpAck,
    DhcpNak,
    DhcpRelease,
    DhcpInform,
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        use self::MessageType::*;
        match value {
            1 => DhcpDiscover,
            2 => DhcpOffer,
            3 => DhcpRequest,
            4 => DhcpDecline,
            5 => DhcpAck,
            6 => DhcpNak,
            7 => DhcpRelease,
            8 => DhcpInform,

            _ => Undefined,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::MessageType::*;
        match self {
            DhcpDiscover => write!(f, "DHCPDISCOVER"),
            DhcpOffer => write!(f, "DHCPOFFER"),
            DhcpRequest => write!(f, "DHCPREQUEST"),
            DhcpDecline => write!(f, "DHCPDECLINE"),
            DhcpAck => write!(f, "DHCPACK"),
            DhcpNak => write!(f, "DHCPNAK"),
            DhcpRelease => write!(f, "DHCPRELEASE"),
            DhcpInform => write!(f, "DHCPINFORM"),

            Undefined => write!(f, "UNDEFINED"),
        }
    }
}

/// The identity of one option entry: the resolved semantic name, or the
/// raw numeric code when no registry in the chain knows the tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionKey {
    Name(String),
    Code(u8),
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionKey::Name(name) => write!(f, "{}", name),
            OptionKey::Code(code) => write!(f, "[{:03}]", code),
        }
    }
}

/// The decoded options of one message.
///
/// Keys are unique and wire position is irrelevant; a `BTreeMap` keeps
/// encoding and display deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<OptionKey, Value>,
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    /// Inserts a value under a semantic name, replacing any previous one.
    pub fn insert<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.entries
            .insert(OptionKey::Name(name.to_owned()), value.into());
    }

    /// Inserts a value under an unresolved numeric code, replacing any
    /// previous one.
    pub fn insert_code<V: Into<Value>>(&mut self, code: u8, value: V) {
        self.entries.insert(OptionKey::Code(code), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&OptionKey::Name(name.to_owned()))
    }

    pub fn get_code(&self, code: u8) -> Option<&Value> {
        self.entries.get(&OptionKey::Code(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// DHCP message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub operation_code: OperationCode,
    pub hardware_type: u8,
    pub hardware_address_length: u8,
    pub hops: u8,
    pub transaction_id: u32,
    pub seconds: u16,
    pub flags: u16,
    pub client_ip_address: Ipv4Addr,
    pub your_ip_address: Ipv4Addr,
    pub server_ip_address: Ipv4Addr,
    pub gateway_ip_address: Ipv4Addr,
    pub client_hardware_address: MacAddress,
    pub server_name: String,
    pub boot_filename: String,
    pub options: Options,
}

impl Message {
    /// The DHCP message type option, when present and well-typed.
    pub fn message_type(&self) -> Option<MessageType> {
        match self.options.get("message-type") {
            Some(Value::Byte(code)) => Some(MessageType::from(*code)),
            _ => None,
        }
    }

    /// The broadcast bit of the `flags` field.
    ///
    /// [RFC 2131 §2](https://tools.ietf.org/html/rfc2131#section-2)
    pub fn is_broadcast(&self) -> bool {
        self.flags & FLAG_BROADCAST != 0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}HEADER{}", "_".repeat(30), "_".repeat(39))?;
        writeln!(f, "{:32} | {}", "Operation code", self.operation_code)?;
        writeln!(f, "{:32} | {}", "Hardware type", self.hardware_type)?;
        writeln!(
            f,
            "{:32} | {}",
            "Hardware address length", self.hardware_address_length
        )?;
        writeln!(f, "{:32} | {}", "Hops", self.hops)?;
        writeln!(f, "{:32} | {}", "Transaction ID", self.transaction_id)?;
        writeln!(f, "{:32} | {}", "Seconds", self.seconds)?;
        writeln!(f, "{:32} | {}", "Broadcast flag", self.is_broadcast())?;
        writeln!(f, "{:32} | {}", "Client IP address", self.client_ip_address)?;
        writeln!(f, "{:32} | {}", "Your IP address", self.your_ip_address)?;
        writeln!(f, "{:32} | {}", "Server IP address", self.server_ip_address)?;
        writeln!(
            f,
            "{:32} | {}",
            "Gateway IP address", self.gateway_ip_address
        )?;
        writeln!(
            f,
            "{:32} | {}",
            "Client hardware address", self.client_hardware_address
        )?;
        writeln!(f, "{:32} | {}", "Server name", self.server_name)?;
        writeln!(f, "{:32} | {}", "Boot filename", self.boot_filename)?;

        writeln!(f, "{}OPTIONS{}", "_".repeat(30), "_".repeat(38))?;
        for (key, value) in self.options.iter() {
            writeln!(f, "{:32} | {}", key.to_string(), value)?;
        }
        writeln!(f, "{}", "_".repeat(75))
    }
}
