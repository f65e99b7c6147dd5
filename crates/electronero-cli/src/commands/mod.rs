//! CLI subcommand implementations.

use std::path::PathBuf;
use std::time::Duration;

use electronero_rpc::{ClientConfig, ElectroneroClient};
use serde_json::Value;

use crate::ConnectionArgs;

pub mod methods;
pub mod rpc;

pub(crate) fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("could not determine home directory")?;
    Ok(home.join(".electronero").join("config.yaml"))
}

/// Layer the flags (and their environment variables) over the config file.
///
/// An explicit `--config` must exist; the default path is optional.
pub(crate) fn resolve_config(
    args: &ConnectionArgs,
) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => {
            let path = default_config_path()?;
            if path.exists() {
                ClientConfig::from_file(&path)?
            } else {
                ClientConfig::default()
            }
        }
    };

    if let Some(url) = &args.wallet_url {
        config.wallet_url = url.clone();
    }
    if let Some(url) = &args.daemon_url {
        config.daemon_url = url.clone();
    }
    if let Some(username) = &args.username {
        config.username = Some(username.clone());
    }
    if let Some(password) = &args.password {
        config.password = Some(password.clone());
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }

    tracing::debug!(?config, "resolved client configuration");
    Ok(config)
}

pub(crate) fn build_client(
    args: &ConnectionArgs,
) -> Result<ElectroneroClient, Box<dyn std::error::Error>> {
    Ok(ElectroneroClient::new(resolve_config(args)?)?)
}

/// Parse a params argument; absent means `{}`.
pub(crate) fn parse_params(params: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    match params {
        None => Ok(Value::Object(Default::default())),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| format!("params are not valid JSON: {e}").into()),
    }
}

/// Ids that look like integers are sent as numbers.
pub(crate) fn parse_id(id: &str) -> Value {
    id.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::from(id))
}
