//! # electronero-rpc
//!
//! Client for the Electronero wallet and daemon RPC services.
//!
//! The wallet and the daemon expose two RPC styles: enveloped JSON-RPC 2.0
//! and, on the daemon, fixed paths taking a bare JSON body. Every known
//! method is listed in a [`MethodRegistry`] and callable by its camel-cased
//! name through [`ElectroneroClient::call`]:
//!
//! ```no_run
//! use electronero_rpc::{ClientConfig, ElectroneroClient};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), electronero_rpc::ClientError> {
//! let client = ElectroneroClient::new(ClientConfig::default())?;
//! let balance = client.call("getBalance", json!({ "account_index": 0 })).await?;
//! let info = client.daemon("/get_info", json!({})).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod router;
pub mod types;

pub use client::{ClientBuilder, ElectroneroClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ErrorKind};
pub use registry::{MethodDescriptor, MethodGroup, MethodRegistry, RegistryError};
