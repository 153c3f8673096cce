//! Message-type dispatch for DHCP endpoints: the handler capability
//! interface, the classification state machine, the reply builder and
//! the sequential session loop.

mod config;
mod dispatcher;
mod error;
mod handler;
mod message_builder;
mod session;

pub use self::{
    config::{Config, DEFAULT_LISTEN_PORT, DHCP_PORT_CLIENT, DHCP_PORT_SERVER},
    dispatcher::Dispatcher,
    error::Error,
    handler::{Handler, Outcome},
    message_builder::ReplyBuilder,
    session::Session,
};
