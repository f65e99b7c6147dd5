//! Name-based dispatch table.
//!
//! Resolution is two-tier: hand-written operations ([`ExplicitMethod`]) are
//! checked first, then the operations generated from the registry. Generated
//! bindings are computed once, when the table is built.

use std::collections::BTreeMap;

use tracing::debug;

use crate::normalize::canonical_name;
use crate::registry::{MethodDescriptor, MethodRegistry};

/// Hand-written operations. These win over a generated operation of the
/// same canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitMethod {
    /// `result.count` of daemon `get_block_count`.
    GetBlockCount,
    /// `result.block_header` of daemon `get_block_header_by_height`.
    GetBlockHeaderByHeight,
    /// Daemon `on_get_block_hash` with positional `[height]`.
    GetBlockHash,
    /// `result.allowance` of wallet `token_allowance`.
    TokenAllowance,
    /// Registered wallet wire names (no network).
    ListWalletMethods,
    /// Registered daemon wire names, JSON-RPC then paths (no network).
    ListDaemonMethods,
}

impl ExplicitMethod {
    pub const ALL: [ExplicitMethod; 6] = [
        ExplicitMethod::GetBlockCount,
        ExplicitMethod::GetBlockHeaderByHeight,
        ExplicitMethod::GetBlockHash,
        ExplicitMethod::TokenAllowance,
        ExplicitMethod::ListWalletMethods,
        ExplicitMethod::ListDaemonMethods,
    ];

    /// Parse a canonical name into an explicit operation.
    pub fn parse_method(s: &str) -> Option<Self> {
        match s {
            "getBlockCount" => Some(Self::GetBlockCount),
            "getBlockHeaderByHeight" => Some(Self::GetBlockHeaderByHeight),
            "getBlockHash" => Some(Self::GetBlockHash),
            "tokenAllowance" => Some(Self::TokenAllowance),
            "listWalletMethods" => Some(Self::ListWalletMethods),
            "listDaemonMethods" => Some(Self::ListDaemonMethods),
            _ => None,
        }
    }

    /// Canonical name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetBlockCount => "getBlockCount",
            Self::GetBlockHeaderByHeight => "getBlockHeaderByHeight",
            Self::GetBlockHash => "getBlockHash",
            Self::TokenAllowance => "tokenAllowance",
            Self::ListWalletMethods => "listWalletMethods",
            Self::ListDaemonMethods => "listDaemonMethods",
        }
    }
}

/// Outcome of resolving a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Explicit(ExplicitMethod),
    Generated(&'a MethodDescriptor),
}

/// Canonical name → operation.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    generated: BTreeMap<String, MethodDescriptor>,
    shadowed: Vec<(String, MethodDescriptor)>,
}

impl DispatchTable {
    /// Bind one generated operation per registry entry.
    ///
    /// When two wire names normalize to the same canonical name, the entry
    /// registered first keeps it; the later one stays reachable through the
    /// raw `wallet`/`daemon` calls and is listed by [`Self::shadowed`].
    pub fn build(registry: &MethodRegistry) -> Self {
        let mut table = Self::default();
        for descriptor in registry.entries() {
            let name = canonical_name(&descriptor.wire_name);
            match table.generated.get(&name) {
                Some(bound) => {
                    debug!(
                        name = %name,
                        bound = %bound.wire_name,
                        shadowed = %descriptor.wire_name,
                        "canonical name already bound"
                    );
                    table.shadowed.push((name, descriptor.clone()));
                }
                None => {
                    table.generated.insert(name, descriptor.clone());
                }
            }
        }
        table
    }

    /// Look a canonical name up, explicit operations first.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(explicit) = ExplicitMethod::parse_method(name) {
            return Some(Resolved::Explicit(explicit));
        }
        self.generated.get(name).map(Resolved::Generated)
    }

    /// Generated operation bound to a canonical name, ignoring explicit ones.
    pub fn generated(&self, name: &str) -> Option<&MethodDescriptor> {
        self.generated.get(name)
    }

    /// Every generated operation, sorted by canonical name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodDescriptor)> {
        self.generated.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that lost their canonical name to an earlier registration.
    pub fn shadowed(&self) -> &[(String, MethodDescriptor)] {
        &self.shadowed
    }

    /// Generated operations hidden behind an explicit one.
    pub fn overridden(&self) -> impl Iterator<Item = (&str, &MethodDescriptor)> {
        self.iter()
            .filter(|(name, _)| ExplicitMethod::parse_method(name).is_some())
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }
}
