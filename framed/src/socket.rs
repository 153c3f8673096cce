//! The main DHCP socket module.

use std::{io, net::SocketAddr};

use bytes::Bytes;
use tokio::net::UdpSocket;

/// Must be enough to hold a DHCP message with all its options.
pub const BUFFER_READ_CAPACITY: usize = 8192;

/// A datagram wrapper around `tokio::net::UdpSocket`.
///
/// The socket is bound (and, for broadcast responses, configured) by the
/// host runtime; this layer only moves whole datagrams.
pub struct DhcpFramed {
    socket: UdpSocket,
    buf_read: Vec<u8>,
}

impl DhcpFramed {
    pub fn new(socket: UdpSocket) -> Self {
        DhcpFramed {
            socket,
            buf_read: vec![0u8; BUFFER_READ_CAPACITY],
        }
    }

    /// The address the underlying socket is bound to.
    ///
    /// # Errors
    /// `io::Error` on a socket error.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Waits for the next inbound datagram.
    ///
    /// # Errors
    /// `io::Error` on a socket error.
    pub async fn recv(&mut self) -> io::Result<(SocketAddr, Bytes)> {
        let (amount, addr) = self.socket.recv_from(&mut self.buf_read).await?;
        Ok((addr, Bytes::copy_from_slice(&self.buf_read[..amount])))
    }

    /// Sends one datagram.
    ///
    /// # Errors
    /// `io::Error` on a socket error or a partial write.
    pub async fn send(&mut self, addr: SocketAddr, payload: &[u8]) -> io::Result<()> {
        let sent = self.socket.send_to(payload, addr).await?;
        if sent != payload.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "Failed to write entire datagram to socket",
            ));
        }
        Ok(())
    }
}
