//! The pluggable option registry.
//!
//! A registry binds numeric option codes to semantic names and wire value
//! types. Registries are built once from a declarative table and composed
//! into an ordered chain: the first registry defining a code or a name is
//! authoritative for it, so applications can override or extend the
//! built-in set without touching the codec.

use std::collections::HashMap;

use crate::{error::Error, value::ValueType};

/// One option the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub code: u8,
    pub name: &'static str,
    pub value_type: ValueType,
}

/// An immutable option table.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<OptionSpec>,
    by_code: HashMap<u8, usize>,
    by_name: HashMap<&'static str, usize>,
}

/// The common option set every default chain understands.
///
/// [RFC 2132](https://tools.ietf.org/html/rfc2132)
const BUILTIN: &[(u8, &str, ValueType)] = &[
    (1, "subnet-mask", ValueType::Ipv4),
    (3, "routers", ValueType::Ipv4List),
    (6, "domain-name-servers", ValueType::Ipv4List),
    (50, "requested-address", ValueType::Ipv4),
    (51, "lease-time", ValueType::U32),
    (53, "message-type", ValueType::Byte),
    (54, "server", ValueType::Ipv4),
    (55, "parameter-request-list", ValueType::Raw),
];

impl Registry {
    /// Builds a registry from a `(code, name, type)` table.
    ///
    /// # Errors
    /// `Error::DuplicateCode` if the table binds one code twice. This is a
    /// configuration error and fatal by design.
    pub fn new(table: &[(u8, &'static str, ValueType)]) -> Result<Self, Error> {
        let mut specs = Vec::with_capacity(table.len());
        let mut by_code = HashMap::with_capacity(table.len());
        let mut by_name = HashMap::with_capacity(table.len());

        for &(code, name, value_type) in table.iter() {
            if by_code.contains_key(&code) {
                return Err(Error::DuplicateCode { code });
            }
            by_code.insert(code, specs.len());
            by_name.entry(name).or_insert_with(|| specs.len());
            specs.push(OptionSpec {
                code,
                name,
                value_type,
            });
        }

        Ok(Registry {
            specs,
            by_code,
            by_name,
        })
    }

    /// The built-in registry: subnet mask, routers, DNS servers, requested
    /// address, lease time, message type, server identifier and the
    /// parameter request list.
    pub fn builtin() -> Self {
        Registry::new(BUILTIN).expect("the built-in option table has no duplicate codes")
    }

    /// Looks a numeric code up in this registry alone.
    pub fn code(&self, code: u8) -> Option<&OptionSpec> {
        self.by_code.get(&code).map(move |&index| &self.specs[index])
    }

    /// Looks a semantic name up in this registry alone.
    pub fn name(&self, name: &str) -> Option<&OptionSpec> {
        self.by_name.get(name).map(move |&index| &self.specs[index])
    }
}

/// Registries consulted in priority order.
///
/// Read-only after construction, so one chain may serve any number of
/// concurrent sessions.
#[derive(Debug, Clone)]
pub struct RegistryChain {
    registries: Vec<Registry>,
}

impl Default for RegistryChain {
    /// A chain holding only the built-in registry.
    fn default() -> Self {
        RegistryChain {
            registries: vec![Registry::builtin()],
        }
    }
}

impl RegistryChain {
    /// A chain consulting `registries` in the given order.
    pub fn new(registries: Vec<Registry>) -> Self {
        RegistryChain { registries }
    }

    /// A chain with no registries at all. Resolves nothing; every decoded
    /// tag stays numeric.
    pub fn empty() -> Self {
        RegistryChain {
            registries: Vec::new(),
        }
    }

    /// Appends a registry with lower priority than those already present.
    pub fn push(&mut self, registry: Registry) {
        self.registries.push(registry);
    }

    /// Resolves a numeric code against the chain.
    pub fn by_code(&self, code: u8) -> Option<&OptionSpec> {
        self.registries.iter().find_map(|registry| registry.code(code))
    }

    /// Resolves a semantic name against the chain.
    ///
    /// # Errors
    /// `Error::UnknownOptionName` if no registry defines the name.
    pub fn by_name(&self, name: &str) -> Result<&OptionSpec, Error> {
        self.registries
            .iter()
            .find_map(|registry| registry.name(name))
            .ok_or_else(|| Error::UnknownOptionName(name.to_owned()))
    }
}
