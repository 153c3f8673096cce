//! The handler capability interface.

use eui48::MacAddress;

use dhcpflow_protocol::Message;

/// What a handler decided to do with one inbound message.
///
/// Every variant carries the session state back to the loop: the state is
/// moved into each handler call and the returned value replaces it before
/// the next datagram is processed.
#[derive(Debug)]
pub enum Outcome<S> {
    /// Encode the reply and send it to the configured response destination.
    Respond(Message, S),
    /// No wire effect.
    NoRespond(S),
    /// Terminate the session, surfacing the reason to the supervisor.
    Stop(String, S),
}

/// The per-message-type callbacks of the embedding application.
///
/// `discover`, `request` and `decline` must be provided. The remaining
/// hooks default to `NoRespond` with the state unchanged, which is the
/// documented policy for an absent handler, not an error.
pub trait Handler {
    /// Session state threaded through consecutive dispatch calls.
    type State;

    fn discover(
        &mut self,
        request: &Message,
        xid: u32,
        chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State>;

    fn request(
        &mut self,
        request: &Message,
        xid: u32,
        chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State>;

    fn decline(
        &mut self,
        request: &Message,
        xid: u32,
        chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State>;

    fn release(
        &mut self,
        _request: &Message,
        _xid: u32,
        _chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State> {
        Outcome::NoRespond(state)
    }

    fn inform(
        &mut self,
        _request: &Message,
        _xid: u32,
        _chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State> {
        Outcome::NoRespond(state)
    }

    /// Any other DHCP message: a reply observed on the wire, an unknown
    /// message type, or a request carrying no message type at all.
    fn packet(
        &mut self,
        _request: &Message,
        _xid: u32,
        _chaddr: MacAddress,
        state: Self::State,
    ) -> Outcome<Self::State> {
        Outcome::NoRespond(state)
    }

    /// Inbound traffic that is not DHCP at all.
    fn raw(&mut self, _payload: &[u8], state: Self::State) -> Outcome<Self::State> {
        Outcome::NoRespond(state)
    }
}
