//! A datagram socket layer designed to feed a DHCP endpoint.
//!
//! Hands raw datagrams up and writes encoded datagrams down; recognizing
//! and decoding DHCP traffic happens in the dispatcher above, so foreign
//! packets sharing the socket reach it too.

mod socket;

pub use self::socket::{DhcpFramed, BUFFER_READ_CAPACITY};
