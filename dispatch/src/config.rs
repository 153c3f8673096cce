//! Transport configuration consumed by the session loop.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// The listening port for unprivileged deployments.
pub const DEFAULT_LISTEN_PORT: u16 = 6767;

/// The conventional DHCP server port, for privileged deployments.
pub const DHCP_PORT_SERVER: u16 = 67;

/// The port clients listen for responses on.
pub const DHCP_PORT_CLIENT: u16 = 68;

/// Where to listen and where responses go.
///
/// The socket itself is bound by the host runtime; these values are
/// consumed here, not enforced.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port the host binds the inbound socket to.
    pub listen_port: u16,
    /// Responses are addressed to this port.
    pub response_port: u16,
    /// Responses are addressed here, the limited broadcast by default.
    pub response_address: Ipv4Addr,
    /// The network device to bind to, where the host supports it.
    pub bind_device: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_port: DEFAULT_LISTEN_PORT,
            response_port: DHCP_PORT_CLIENT,
            response_address: Ipv4Addr::BROADCAST,
            bind_device: None,
        }
    }
}

impl Config {
    /// The response destination as a socket address.
    pub fn destination(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(self.response_address), self.response_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_limited_broadcast() {
        let config = Config::default();

        assert_eq!(config.listen_port, 6767);
        assert_eq!(config.destination(), "255.255.255.255:68".parse().unwrap());
        assert!(config.bind_device.is_none());
    }
}
