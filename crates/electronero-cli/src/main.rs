//! # electronero CLI
//!
//! Entry point for the `electronero` binary.
//!
//! Subcommands:
//! - `electronero wallet <METHOD> [PARAMS]` to call a wallet JSON-RPC method
//! - `electronero daemon <METHOD> [PARAMS]` to call a daemon method or `/path`
//! - `electronero call <NAME> [PARAMS]` to call an operation by camel-cased name
//! - `electronero methods` to list the known operations

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use electronero_rpc::config::{
    ENV_DAEMON_URL, ENV_PASSWORD, ENV_TIMEOUT, ENV_USERNAME, ENV_WALLET_URL,
};
use electronero_rpc::MethodGroup;
use tracing_subscriber::EnvFilter;

mod commands;

/// Command-line client for the Electronero wallet and daemon RPC services.
#[derive(Parser)]
#[command(name = "electronero", version, about)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Endpoint and credential overrides, each also read from its
/// `ELECTRONERO_*` variable. Either beats the config file.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Path to config.yaml (default: ~/.electronero/config.yaml).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Wallet JSON-RPC URL.
    #[arg(long, global = true, env = ENV_WALLET_URL)]
    wallet_url: Option<String>,

    /// Daemon JSON-RPC URL; path methods go to its base.
    #[arg(long, global = true, env = ENV_DAEMON_URL)]
    daemon_url: Option<String>,

    /// HTTP Basic username.
    #[arg(long, global = true, env = ENV_USERNAME)]
    username: Option<String>,

    /// HTTP Basic password.
    #[arg(long, global = true, env = ENV_PASSWORD, hide_env_values = true)]
    password: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long, global = true, env = ENV_TIMEOUT)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Call a wallet JSON-RPC method.
    Wallet {
        /// Wire name, e.g. `get_balance`.
        method: String,

        /// Params as a JSON document (default: `{}`).
        params: Option<String>,

        /// Request id (default: current time in milliseconds).
        #[arg(long)]
        id: Option<String>,
    },

    /// Call a daemon JSON-RPC method, or a path such as `/get_info`.
    Daemon {
        /// Wire name, e.g. `get_info` or `/get_transactions`.
        method: String,

        /// Params as a JSON document (default: `{}`).
        params: Option<String>,

        /// Request id (default: current time in milliseconds).
        #[arg(long)]
        id: Option<String>,

        /// Write the response body to stdout undecoded (for `.bin` paths).
        #[arg(long)]
        raw: bool,
    },

    /// Call an operation by camel-cased name, e.g. `getBalance`.
    Call {
        name: String,

        /// Params as a JSON document (default: `{}`).
        params: Option<String>,
    },

    /// List known operations.
    Methods {
        /// Only show one group: wallet, daemon or path.
        #[arg(long, value_parser = parse_group)]
        group: Option<MethodGroup>,

        /// Print wire names instead of canonical names.
        #[arg(long)]
        wire: bool,
    },
}

fn parse_group(s: &str) -> Result<MethodGroup, String> {
    MethodGroup::parse_group(s)
        .ok_or_else(|| format!("unknown group `{s}` (expected wallet, daemon or path)"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Wallet { method, params, id } => {
            commands::rpc::wallet(&cli.connection, method, params, id).await
        }
        Commands::Daemon {
            method,
            params,
            id,
            raw,
        } => commands::rpc::daemon(&cli.connection, method, params, id, raw).await,
        Commands::Call { name, params } => {
            commands::rpc::call(&cli.connection, name, params).await
        }
        Commands::Methods { group, wire } => commands::methods::run(&cli.connection, group, wire),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
