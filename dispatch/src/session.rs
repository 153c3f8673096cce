//! Session module.

use log::{info, warn};

use dhcpflow_framed::DhcpFramed;

use crate::{
    config::Config,
    dispatcher::Dispatcher,
    error::Error,
    handler::{Handler, Outcome},
};

/// One logical DHCP session: a socket, a dispatcher and the state the
/// handlers thread through it.
///
/// Datagrams are processed strictly one at a time; a handler runs to
/// completion before the next receive, so handlers never observe a
/// concurrent invocation and the state needs no locking.
pub struct Session<H: Handler> {
    socket: DhcpFramed,
    dispatcher: Dispatcher<H>,
    config: Config,
    state: H::State,
}

impl<H: Handler> Session<H> {
    pub fn new(
        socket: DhcpFramed,
        dispatcher: Dispatcher<H>,
        config: Config,
        state: H::State,
    ) -> Self {
        Session {
            socket,
            dispatcher,
            config,
            state,
        }
    }

    /// Runs until a handler stops the session or an error ends it.
    ///
    /// Returns the stop reason and the final state on a clean stop.
    ///
    /// # Errors
    /// `Error::Protocol` when a cookie-tagged datagram fails to decode or
    /// a response fails to encode; recovery is the supervising layer's
    /// responsibility.
    /// `Error::Transport` on a socket failure.
    pub async fn run(self) -> Result<(String, H::State), Error> {
        let Session {
            mut socket,
            mut dispatcher,
            config,
            mut state,
        } = self;
        let destination = config.destination();

        loop {
            let (source, payload) = socket.recv().await?;
            match dispatcher.dispatch(source, &payload, state)? {
                Outcome::Respond(response, next) => {
                    info!(
                        "Response to {} for the request from {}:\n{}",
                        destination, source, response
                    );
                    let encoded = response.to_bytes(dispatcher.chain())?;
                    socket.send(destination, &encoded).await?;
                    state = next;
                }
                Outcome::NoRespond(next) => {
                    state = next;
                }
                Outcome::Stop(reason, next) => {
                    warn!("Session stopped: {}", reason);
                    return Ok((reason, next));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use eui48::MacAddress;
    use tokio::net::UdpSocket;

    use super::*;
    use crate::message_builder::ReplyBuilder;
    use dhcpflow_protocol::{
        Message, MessageType, OperationCode, Options, RegistryChain,
    };

    struct Offering {
        address: Ipv4Addr,
    }

    impl Handler for Offering {
        type State = usize;

        fn discover(
            &mut self,
            request: &Message,
            _xid: u32,
            _chaddr: MacAddress,
            state: usize,
        ) -> Outcome<usize> {
            let response = ReplyBuilder::to(request, MessageType::DhcpOffer)
                .your_ip_address(self.address)
                .option("lease-time", 86400u32)
                .build();
            Outcome::Respond(response, state + 1)
        }

        fn request(
            &mut self,
            _request: &Message,
            _xid: u32,
            _chaddr: MacAddress,
            state: usize,
        ) -> Outcome<usize> {
            Outcome::NoRespond(state)
        }

        fn decline(
            &mut self,
            _request: &Message,
            _xid: u32,
            _chaddr: MacAddress,
            state: usize,
        ) -> Outcome<usize> {
            Outcome::NoRespond(state)
        }
    }

    #[tokio::test]
    async fn responds_to_a_discover_over_loopback() {
        let chain = RegistryChain::default();

        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let client_addr = client.local_addr().unwrap();

        let config = Config {
            listen_port: server_addr.port(),
            response_port: client_addr.port(),
            response_address: Ipv4Addr::LOCALHOST,
            bind_device: None,
        };
        let dispatcher = Dispatcher::new(
            RegistryChain::default(),
            Offering {
                address: Ipv4Addr::new(192, 168, 1, 100),
            },
        );
        let session = Session::new(DhcpFramed::new(server), dispatcher, config, 0);
        tokio::spawn(session.run());

        let mut options = Options::new();
        options.insert("message-type", 1u8);
        let request = Message {
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
            options,
        };
        client
            .send_to(&request.to_bytes(&chain).unwrap(), server_addr)
            .await
            .unwrap();

        let mut buffer = vec![0u8; 2048];
        let (amount, _) = client.recv_from(&mut buffer).await.unwrap();
        let response = Message::from_bytes(&buffer[..amount], &chain).unwrap();

        assert_eq!(response.operation_code, OperationCode::BootReply);
        assert_eq!(response.message_type(), Some(MessageType::DhcpOffer));
        assert_eq!(response.transaction_id, request.transaction_id);
        assert_eq!(response.your_ip_address, Ipv4Addr::new(192, 168, 1, 100));
    }
}
