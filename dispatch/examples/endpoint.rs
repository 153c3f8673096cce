//! A minimal DHCP endpoint offering one fixed address to every client.

use std::net::{Ipv4Addr, SocketAddr};

use eui48::MacAddress;
use log::{error, info};

use dhcpflow_dispatch::{Config, Dispatcher, Handler, Outcome, ReplyBuilder, Session};
use dhcpflow_framed::DhcpFramed;
use dhcpflow_protocol::{Message, MessageType, RegistryChain};

struct StaticPool {
    address: Ipv4Addr,
    server: Ipv4Addr,
    server_name: String,
}

impl StaticPool {
    fn reply(&self, request: &Message, kind: MessageType) -> Message {
        ReplyBuilder::to(request, kind)
            .your_ip_address(self.address)
            .server_ip_address(self.server)
            .server_name(&self.server_name)
            .option("subnet-mask", Ipv4Addr::new(255, 255, 255, 0))
            .option("routers", vec![self.server])
            .option("domain-name-servers", vec![Ipv4Addr::new(8, 8, 8, 8)])
            .option("lease-time", 86400u32)
            .option("server", self.server)
            .build()
    }
}

impl Handler for StaticPool {
    type State = u64;

    fn discover(
        &mut self,
        request: &Message,
        _xid: u32,
        _chaddr: MacAddress,
        state: u64,
    ) -> Outcome<u64> {
        Outcome::Respond(self.reply(request, MessageType::DhcpOffer), state + 1)
    }

    fn request(
        &mut self,
        request: &Message,
        _xid: u32,
        _chaddr: MacAddress,
        state: u64,
    ) -> Outcome<u64> {
        Outcome::Respond(self.reply(request, MessageType::DhcpAck), state + 1)
    }

    fn decline(
        &mut self,
        _request: &Message,
        _xid: u32,
        chaddr: MacAddress,
        state: u64,
    ) -> Outcome<u64> {
        info!("Client {} declined the offered address", chaddr);
        Outcome::NoRespond(state)
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::default();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let socket = tokio::net::UdpSocket::bind(addr)
        .await
        .expect("Failed to bind the listening socket");
    socket
        .set_broadcast(true)
        .expect("Failed to enable broadcast responses");

    let handler = StaticPool {
        address: Ipv4Addr::new(192, 168, 0, 100),
        server: Ipv4Addr::new(192, 168, 0, 1),
        server_name: hostname::get()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let dispatcher = Dispatcher::new(RegistryChain::default(), handler);
    let session = Session::new(DhcpFramed::new(socket), dispatcher, config, 0);

    match session.run().await {
        Ok((reason, served)) => info!("Session stopped after {} responses: {}", served, reason),
        Err(error) => error!("Session error: {}", error),
    }
}
