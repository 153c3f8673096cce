//! Reply construction module.

use std::net::Ipv4Addr;

use dhcpflow_protocol::{Message, MessageType, OperationCode, Options, Value};

/// Builds a reply sharing the requester's identity fields.
///
/// Construction never fails: option names are stored as given and resolved
/// against the registry chain when the reply is encoded.
pub struct ReplyBuilder {
    reply: Message,
}

impl ReplyBuilder {
    /// Starts a reply to `request` of the given kind.
    ///
    /// `xid`, `htype`, `hlen` and `chaddr` are shared with the request;
    /// every other field starts zeroed or empty.
    pub fn to(request: &Message, kind: MessageType) -> Self {
        let mut options = Options::new();
        options.insert("message-type", kind as u8);

        ReplyBuilder {
            reply: Message {
                operation_code: OperationCode::BootReply,
                hardware_type: request.hardware_type,
                hardware_address_length: request.hardware_address_length,
                hops: 0,
                transaction_id: request.transaction_id,
                seconds: 0,
                flags: 0,
                client_ip_address: Ipv4Addr::UNSPECIFIED,
                your_ip_address: Ipv4Addr::UNSPECIFIED,
                server_ip_address: Ipv4Addr::UNSPECIFIED,
                gateway_ip_address: Ipv4Addr::UNSPECIFIED,
                client_hardware_address: request.client_hardware_address,
                server_name: String::new(),
                boot_filename: String::new(),
                options,
            },
        }
    }

    pub fn your_ip_address(mut self, address: Ipv4Addr) -> Self {
        self.reply.your_ip_address = address;
        self
    }

    pub fn server_ip_address(mut self, address: Ipv4Addr) -> Self {
        self.reply.server_ip_address = address;
        self
    }

    pub fn gateway_ip_address(mut self, address: Ipv4Addr) -> Self {
        self.reply.gateway_ip_address = address;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.reply.flags = flags;
        self
    }

    pub fn server_name<S: ToString>(mut self, name: S) -> Self {
        self.reply.server_name = name.to_string();
        self
    }

    pub fn boot_filename<S: ToString>(mut self, filename: S) -> Self {
        self.reply.boot_filename = filename.to_string();
        self
    }

    /// Merges one named option value into the reply.
    pub fn option<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.reply.options.insert(name, value);
        self
    }

    pub fn build(self) -> Message {
        self.reply
    }
}
