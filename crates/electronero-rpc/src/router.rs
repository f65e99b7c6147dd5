//! Maps a method to the endpoint and wire format it travels over.
//!
//! The wallet and the daemon's `/json_rpc` endpoint speak enveloped JSON-RPC
//! 2.0. The daemon also serves a family of fixed paths (`/get_info`,
//! `/send_raw_transaction`, ...) next to `/json_rpc` that take the bare
//! params object as the request body.

use crate::registry::MethodGroup;

/// Suffix removed from the daemon URL to find the path endpoints.
const JSON_RPC_SUFFIX: &str = "/json_rpc";

/// How the request body is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `{"jsonrpc":"2.0","id":..,"method":..,"params":..}`
    JsonRpc,
    /// The params object itself, no envelope.
    Bare,
}

/// Where and how a single call is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Full URL to POST to.
    pub url: String,
    pub format: WireFormat,
    /// Wire name, carried in the envelope for JSON-RPC routes.
    pub method: String,
}

/// Derive the daemon base URL from its JSON-RPC endpoint.
///
/// Trailing slashes are ignored, then one `/json_rpc` suffix is removed.
/// URLs without the suffix are returned with trailing slashes trimmed.
pub fn daemon_base_url(daemon_url: &str) -> String {
    let trimmed = daemon_url.trim_end_matches('/');
    trimmed
        .strip_suffix(JSON_RPC_SUFFIX)
        .unwrap_or(trimmed)
        .to_string()
}

/// Append a `/`-prefixed path to a base URL.
pub fn join_path(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Group a raw daemon method name belongs to, judged by its leading `/`.
pub fn daemon_group(method: &str) -> MethodGroup {
    if method.starts_with('/') {
        MethodGroup::DaemonPath
    } else {
        MethodGroup::DaemonJsonRpc
    }
}

/// Endpoint table computed once from the client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    wallet_url: String,
    daemon_url: String,
    daemon_base_url: String,
}

impl Router {
    pub fn new(wallet_url: impl Into<String>, daemon_url: impl Into<String>) -> Self {
        let daemon_url = daemon_url.into();
        Self {
            wallet_url: wallet_url.into(),
            daemon_base_url: daemon_base_url(&daemon_url),
            daemon_url,
        }
    }

    pub fn wallet_url(&self) -> &str {
        &self.wallet_url
    }

    pub fn daemon_url(&self) -> &str {
        &self.daemon_url
    }

    pub fn daemon_base_url(&self) -> &str {
        &self.daemon_base_url
    }

    /// Route a wire name of a known group.
    pub fn route(&self, group: MethodGroup, wire_name: &str) -> Route {
        let (url, format) = match group {
            MethodGroup::WalletJsonRpc => (self.wallet_url.clone(), WireFormat::JsonRpc),
            MethodGroup::DaemonJsonRpc => (self.daemon_url.clone(), WireFormat::JsonRpc),
            MethodGroup::DaemonPath => (
                join_path(&self.daemon_base_url, wire_name),
                WireFormat::Bare,
            ),
        };
        Route {
            url,
            format,
            method: wire_name.to_string(),
        }
    }

    /// Route a raw daemon method name, registered or not.
    pub fn daemon(&self, method: &str) -> Route {
        self.route(daemon_group(method), method)
    }

    /// Route a raw wallet method name, registered or not.
    pub fn wallet(&self, method: &str) -> Route {
        self.route(MethodGroup::WalletJsonRpc, method)
    }
}
