//! Dispatch error module.

use thiserror::Error;

/// Errors that terminate a session.
///
/// A decode failure of a cookie-tagged datagram is deliberately not
/// recovered here: the supervising layer owns the restart policy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("protocol error: {0}")]
    Protocol(#[from] dhcpflow_protocol::Error),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
