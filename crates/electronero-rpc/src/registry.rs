//! Catalog of known remote methods.
//!
//! Every wire-level method name the client knows about lives here, grouped by
//! the transport it has to travel over. The registry is built once and is
//! read-only afterwards; the dispatch table and the router are generic over
//! whatever it contains.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Transport group a wire name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodGroup {
    /// JSON-RPC 2.0 method served by the wallet RPC.
    WalletJsonRpc,
    /// JSON-RPC 2.0 method served by the daemon's `/json_rpc` endpoint.
    DaemonJsonRpc,
    /// Fixed daemon path taking a bare JSON body (wire name starts with `/`).
    DaemonPath,
}

impl MethodGroup {
    /// All groups, in registration order.
    pub const ALL: [MethodGroup; 3] = [
        MethodGroup::WalletJsonRpc,
        MethodGroup::DaemonJsonRpc,
        MethodGroup::DaemonPath,
    ];

    /// Short name used in listings and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WalletJsonRpc => "wallet",
            Self::DaemonJsonRpc => "daemon",
            Self::DaemonPath => "path",
        }
    }

    /// Parse a short group name.
    pub fn parse_group(s: &str) -> Option<Self> {
        match s {
            "wallet" => Some(Self::WalletJsonRpc),
            "daemon" => Some(Self::DaemonJsonRpc),
            "path" => Some(Self::DaemonPath),
            _ => None,
        }
    }
}

impl fmt::Display for MethodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Literal identifier the remote service expects.
    pub wire_name: String,
    /// Transport group.
    pub group: MethodGroup,
}

impl MethodDescriptor {
    pub fn new(wire_name: impl Into<String>, group: MethodGroup) -> Self {
        Self {
            wire_name: wire_name.into(),
            group,
        }
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("method `{wire_name}` registered for both {existing} and {requested}")]
    Overlap {
        wire_name: String,
        existing: MethodGroup,
        requested: MethodGroup,
    },
    #[error("method `{wire_name}` registered twice for {group}")]
    Duplicate {
        wire_name: String,
        group: MethodGroup,
    },
    #[error("path method `{0}` must start with '/'")]
    MissingSlash(String),
    #[error("JSON-RPC method `{0}` must not start with '/'")]
    UnexpectedSlash(String),
    #[error("empty method name")]
    Empty,
}

/// Wallet JSON-RPC methods.
pub const WALLET_METHODS: &[&str] = &[
    "add_address_book",
    "all_tokens",
    "check_reserve_proof",
    "check_spend_proof",
    "check_tx_key",
    "check_tx_proof",
    "create_account",
    "create_address",
    "create_wallet",
    "delete_address_book",
    "export_key_images",
    "export_multisig_info",
    "finalize_multisig",
    "get_account_tags",
    "get_accounts",
    "get_address",
    "get_address_book",
    "get_attribute",
    "get_balance",
    "get_bulk_payments",
    "get_height",
    "get_languages",
    "get_payments",
    "get_reserve_proof",
    "get_spend_proof",
    "get_transfer_by_txid",
    "get_transfers",
    "get_tx_key",
    "get_tx_notes",
    "get_tx_proof",
    "getaddress",
    "getbalance",
    "getheight",
    "import_key_images",
    "import_multisig_info",
    "incoming_transfers",
    "is_multisig",
    "label_account",
    "label_address",
    "make_integrated_address",
    "make_multisig",
    "make_uri",
    "my_tokens",
    "open_wallet",
    "parse_uri",
    "prepare_multisig",
    "query_key",
    "relay_tx",
    "rescan_blockchain",
    "rescan_spent",
    "rescan_token_tx",
    "set_account_tag_description",
    "set_attribute",
    "set_tx_notes",
    "sign",
    "sign_multisig",
    "split_integrated_address",
    "start_mining",
    "stop_mining",
    "stop_wallet",
    "store",
    "submit_multisig",
    "sweep_all",
    "sweep_dust",
    "sweep_single",
    "sweep_unmixable",
    "tag_accounts",
    "token_approve",
    "token_balance",
    "token_burn",
    "token_create",
    "token_history",
    "token_history_addr",
    "token_info",
    "token_lock_fee",
    "token_mint",
    "token_set_fee",
    "token_transfer",
    "token_transfer_from",
    "tokens_deployed",
    "transfer",
    "transfer_split",
    "untag_accounts",
    "verify",
];

/// Daemon JSON-RPC methods.
///
/// `relay_tx` and `rescan_token_tx` are served by the wallet only; they are
/// reachable on the daemon through [`crate::ElectroneroClient::daemon`].
pub const DAEMON_JSON_METHODS: &[&str] = &[
    "flush_txpool",
    "get_alternate_chains",
    "get_bans",
    "get_block",
    "get_block_count",
    "get_block_header_by_hash",
    "get_block_header_by_height",
    "get_block_headers_range",
    "get_block_template",
    "get_coinbase_tx_sum",
    "get_connections",
    "get_fee_estimate",
    "get_info",
    "get_last_block_header",
    "get_output_distribution",
    "get_output_histogram",
    "get_txpool_backlog",
    "get_version",
    "getblock",
    "getblockcount",
    "getblockheaderbyhash",
    "getblockheaderbyheight",
    "getblockheadersrange",
    "getblocktemplate",
    "getlastblockheader",
    "hard_fork_info",
    "on_get_block_hash",
    "on_getblockhash",
    "set_bans",
    "submit_block",
    "submitblock",
    "sync_info",
];

/// Daemon endpoints addressed by path.
pub const DAEMON_PATH_METHODS: &[&str] = &[
    "/get_alt_blocks_hashes",
    "/get_blocks.bin",
    "/get_blocks_by_height.bin",
    "/get_hashes.bin",
    "/get_height",
    "/get_info",
    "/get_limit",
    "/get_o_indexes.bin",
    "/get_outs",
    "/get_outs.bin",
    "/get_peer_list",
    "/get_random_outs.bin",
    "/get_random_rctouts.bin",
    "/get_transaction_pool",
    "/get_transaction_pool_hashes.bin",
    "/get_transaction_pool_stats",
    "/get_transactions",
    "/getblocks.bin",
    "/getblocks_by_height.bin",
    "/gethashes.bin",
    "/getheight",
    "/getinfo",
    "/getrandom_outs.bin",
    "/getrandom_rctouts.bin",
    "/gettransactions",
    "/in_peers",
    "/is_key_image_spent",
    "/mining_status",
    "/out_peers",
    "/save_bc",
    "/send_raw_transaction",
    "/sendrawtransaction",
    "/set_limit",
    "/set_log_categories",
    "/set_log_hash_rate",
    "/set_log_level",
    "/start_mining",
    "/start_save_graph",
    "/stop_daemon",
    "/stop_mining",
    "/stop_save_graph",
    "/update",
];

/// Immutable catalog of wire names.
///
/// Entries keep their registration order, which is the order the dispatch
/// table binds canonical names in.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    entries: Vec<MethodDescriptor>,
    by_wire_name: BTreeMap<String, MethodGroup>,
}

impl MethodRegistry {
    /// Registry holding the built-in Electronero catalog.
    pub fn electronero() -> Result<Self, RegistryError> {
        RegistryBuilder::new()
            .extend(MethodGroup::WalletJsonRpc, WALLET_METHODS.iter().copied())?
            .extend(MethodGroup::DaemonJsonRpc, DAEMON_JSON_METHODS.iter().copied())?
            .extend(MethodGroup::DaemonPath, DAEMON_PATH_METHODS.iter().copied())
            .map(RegistryBuilder::build)
    }

    /// Start an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[MethodDescriptor] {
        &self.entries
    }

    /// Group of a wire name, if registered.
    pub fn group_of(&self, wire_name: &str) -> Option<MethodGroup> {
        self.by_wire_name.get(wire_name).copied()
    }

    /// Wire names registered for one group, in registration order.
    pub fn wire_names(&self, group: MethodGroup) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |d| d.group == group)
            .map(|d| d.wire_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder that enforces disjoint groups.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: MethodRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one wire name.
    ///
    /// Fails if the name is already registered, in any group, or if its
    /// leading `/` does not match the group.
    pub fn register(mut self, group: MethodGroup, wire_name: &str) -> Result<Self, RegistryError> {
        if wire_name.is_empty() || wire_name == "/" {
            return Err(RegistryError::Empty);
        }
        let is_path = wire_name.starts_with('/');
        match group {
            MethodGroup::DaemonPath if !is_path => {
                return Err(RegistryError::MissingSlash(wire_name.to_string()));
            }
            MethodGroup::WalletJsonRpc | MethodGroup::DaemonJsonRpc if is_path => {
                return Err(RegistryError::UnexpectedSlash(wire_name.to_string()));
            }
            _ => {}
        }

        if let Some(existing) = self.registry.by_wire_name.get(wire_name).copied() {
            return Err(if existing == group {
                RegistryError::Duplicate {
                    wire_name: wire_name.to_string(),
                    group,
                }
            } else {
                RegistryError::Overlap {
                    wire_name: wire_name.to_string(),
                    existing,
                    requested: group,
                }
            });
        }

        self.registry
            .by_wire_name
            .insert(wire_name.to_string(), group);
        self.registry
            .entries
            .push(MethodDescriptor::new(wire_name, group));
        Ok(self)
    }

    /// Add every name from a list.
    pub fn extend<'a>(
        self,
        group: MethodGroup,
        wire_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, RegistryError> {
        wire_names
            .into_iter()
            .try_fold(self, |builder, name| builder.register(group, name))
    }

    pub fn build(self) -> MethodRegistry {
        self.registry
    }
}
