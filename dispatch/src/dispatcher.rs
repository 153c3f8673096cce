//! The message dispatcher: recognizes DHCP traffic, classifies it by
//! operation code and message type, and routes it to exactly one handler
//! callback.

use std::net::SocketAddr;

use log::{debug, info};

use dhcpflow_protocol::{
    constants::{MAGIC_COOKIE, OFFSET_MAGIC_COOKIE, OFFSET_OPTIONS},
    Message, MessageType, OperationCode, RegistryChain,
};

use crate::{
    error::Error,
    handler::{Handler, Outcome},
};

/// Routes each inbound datagram to one handler callback and hands its
/// outcome back to the session loop.
pub struct Dispatcher<H> {
    chain: RegistryChain,
    handler: H,
}

impl<H: Handler> Dispatcher<H> {
    pub fn new(chain: RegistryChain, handler: H) -> Self {
        Dispatcher { chain, handler }
    }

    /// The registry chain messages are decoded and encoded with.
    pub fn chain(&self) -> &RegistryChain {
        &self.chain
    }

    /// Dispatches one datagram.
    ///
    /// Datagrams without the full fixed header or the options magic cookie
    /// are not DHCP and go to the raw hook, whatever they contain.
    ///
    /// # Errors
    /// `Error::Protocol` when a recognized DHCP datagram fails to decode.
    /// The session does not survive this; the supervising layer restarts it.
    pub fn dispatch(
        &mut self,
        source: SocketAddr,
        payload: &[u8],
        state: H::State,
    ) -> Result<Outcome<H::State>, Error> {
        if !Self::is_dhcp(payload) {
            debug!("{} non-DHCP bytes from {}", payload.len(), source);
            return Ok(self.handler.raw(payload, state));
        }

        let message = Message::from_bytes(payload, &self.chain)?;
        info!("Request from {}:\n{}", source, message);

        let xid = message.transaction_id;
        let chaddr = message.client_hardware_address;

        use MessageType::*;
        Ok(match (message.operation_code, message.message_type()) {
            (OperationCode::BootRequest, Some(DhcpDiscover)) => {
                self.handler.discover(&message, xid, chaddr, state)
            }
            (OperationCode::BootRequest, Some(DhcpRequest)) => {
                self.handler.request(&message, xid, chaddr, state)
            }
            (OperationCode::BootRequest, Some(DhcpDecline)) => {
                self.handler.decline(&message, xid, chaddr, state)
            }
            (OperationCode::BootRequest, Some(DhcpRelease)) => {
                self.handler.release(&message, xid, chaddr, state)
            }
            (OperationCode::BootRequest, Some(DhcpInform)) => {
                self.handler.inform(&message, xid, chaddr, state)
            }
            _ => self.handler.packet(&message, xid, chaddr, state),
        })
    }

    /// The length and magic cookie pre-check, done before any decoding.
    fn is_dhcp(payload: &[u8]) -> bool {
        payload.len() >= OFFSET_OPTIONS
            && payload[OFFSET_MAGIC_COOKIE..OFFSET_OPTIONS] == MAGIC_COOKIE
    }
}
