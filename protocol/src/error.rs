//! Protocol error module.

use thiserror::Error;

/// Errors produced by the codec and the option registries.
///
/// Wire-originated errors (`TooShort`, `MalformedOption`) invalidate the
/// whole packet; the others surface caller mistakes synchronously.
#[derive(Debug, Error)]
pub enum Error {
    /// The datagram ends before the fixed BOOTP header does.
    #[error("datagram is {actual} bytes, the fixed header needs {expected}")]
    TooShort { actual: usize, expected: usize },

    /// A TLV entry is inconsistent with the buffer or with the arity of
    /// its registered value type.
    #[error("malformed option {tag}: {reason}")]
    MalformedOption { tag: u8, reason: &'static str },

    /// A response references an option name no registry in the chain
    /// defines. A caller error, not a wire error.
    #[error("option name `{0}` is not defined by any registry")]
    UnknownOptionName(String),

    /// A fixed-width field or an option body overflows its wire slot.
    #[error("`{field}` is {actual} bytes, the wire allows {max}")]
    FieldTooLarge {
        field: String,
        actual: usize,
        max: usize,
    },

    /// The same code was registered twice within a single registry.
    #[error("option code {code} is registered twice in one registry")]
    DuplicateCode { code: u8 },
}
