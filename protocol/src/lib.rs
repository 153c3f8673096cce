//! The DHCP wire protocol: the message data model, the pluggable option
//! registry and the binary codec.
//!
//! Option semantics are not hardcoded: every option the codec understands
//! comes from a [`RegistryChain`] supplied by the embedding application,
//! and tags no registry resolves are carried through verbatim.

pub mod constants;

mod deserializer;
mod error;
mod message;
mod registry;
mod serializer;
mod value;

pub use self::{
    error::Error,
    message::{Message, MessageType, OperationCode, OptionKey, Options},
    registry::{OptionSpec, Registry, RegistryChain},
    value::{Value, ValueType},
};
