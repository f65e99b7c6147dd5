//! Client configuration.
//!
//! Loaded from YAML or built in code, optionally overridden from the
//! environment, and frozen once handed to [`crate::ElectroneroClient`].

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wallet RPC endpoint.
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:26969/json_rpc";
/// Default daemon JSON-RPC endpoint.
pub const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:26968/json_rpc";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const ENV_WALLET_URL: &str = "ELECTRONERO_WALLET_URL";
pub const ENV_DAEMON_URL: &str = "ELECTRONERO_DAEMON_URL";
pub const ENV_USERNAME: &str = "ELECTRONERO_RPC_USER";
pub const ENV_PASSWORD: &str = "ELECTRONERO_RPC_PASSWORD";
pub const ENV_TIMEOUT: &str = "ELECTRONERO_RPC_TIMEOUT";

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {field} `{url}`: {reason}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        reason: String,
    },
    #[error("invalid value for {var}: `{value}`")]
    InvalidEnv { var: &'static str, value: String },
    #[error("credentials cannot be sent as a header: {0}")]
    InvalidCredentials(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Endpoints, credentials and transport settings.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Wallet JSON-RPC endpoint.
    pub wallet_url: String,
    /// Daemon JSON-RPC endpoint; path methods are served next to it.
    pub daemon_url: String,
    /// HTTP Basic username.
    pub username: Option<String>,
    /// HTTP Basic password.
    pub password: Option<String>,
    /// Whole-request timeout in milliseconds; `0` disables it.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wallet_url: DEFAULT_WALLET_URL.to_string(),
            daemon_url: DEFAULT_DAEMON_URL.to_string(),
            username: None,
            password: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("wallet_url", &self.wallet_url)
            .field("daemon_url", &self.daemon_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a YAML string. Missing keys take defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn with_wallet_url(mut self, url: impl Into<String>) -> Self {
        self.wallet_url = url.into();
        self
    }

    pub fn with_daemon_url(mut self, url: impl Into<String>) -> Self {
        self.daemon_url = url.into();
        self
    }

    /// Set HTTP Basic credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout. Only `Duration::ZERO` disables it; a
    /// non-zero value below one millisecond is rounded up.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = match u64::try_from(timeout.as_millis()) {
            Ok(0) if !timeout.is_zero() => 1,
            Ok(ms) => ms,
            Err(_) => u64::MAX,
        };
        self
    }

    /// Request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Override fields from `ELECTRONERO_*` environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|var| std::env::var(var).ok())
    }

    /// Override fields from an arbitrary variable lookup.
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_WALLET_URL) {
            self.wallet_url = url;
        }
        if let Some(url) = lookup(ENV_DAEMON_URL) {
            self.daemon_url = url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(value) = lookup(ENV_TIMEOUT) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT,
                value,
            })?;
            self = self.with_timeout(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Check that both endpoints are absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("wallet_url", &self.wallet_url)?;
        validate_url("daemon_url", &self.daemon_url)
    }
}

fn validate_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
        reason,
    };
    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
