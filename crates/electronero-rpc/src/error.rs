//! Client errors and response classification.

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::ConfigError;
use crate::registry::RegistryError;
use crate::router::WireFormat;
use crate::types::{error_object, JsonRpcError, JsonRpcResponse};

/// Longest body excerpt kept in a decode error.
const SNIPPET_LEN: usize = 256;

/// Error type for RPC client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("connection error: {0}")]
    Connection(String),
    #[error("timeout waiting for response")]
    Timeout,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON response ({reason}): {snippet}")]
    Decode { snippet: String, reason: String },
    #[error("RPC error {code}: {message}")]
    Server { code: i64, message: String },
    #[error("unknown RPC method: {0}")]
    NoSuchMethod(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-2xx HTTP status.
    Transport,
    /// 2xx response whose body could not be decoded.
    Decode,
    /// Error object reported by the remote service.
    Protocol,
    /// No explicit or generated operation has the requested name.
    NoSuchMethod,
    /// Params could not be serialized or are missing a required field.
    InvalidParams,
    /// The client could not be built.
    Config,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { .. } | Self::Connection(_) | Self::Timeout | Self::Http(_) => {
                ErrorKind::Transport
            }
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Server { .. } => ErrorKind::Protocol,
            Self::NoSuchMethod(_) => ErrorKind::NoSuchMethod,
            Self::Serde(_) | Self::InvalidParams(_) => ErrorKind::InvalidParams,
            Self::Config(_) | Self::Registry(_) => ErrorKind::Config,
        }
    }

    /// HTTP status of a transport error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Remote error code of a protocol error.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify a failure reported by reqwest.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else {
            Self::Http(e)
        }
    }

    pub(crate) fn decode(body: &[u8], reason: impl ToString) -> Self {
        Self::Decode {
            snippet: snippet(body),
            reason: reason.to_string(),
        }
    }
}

impl From<JsonRpcError> for ClientError {
    fn from(e: JsonRpcError) -> Self {
        Self::Server {
            code: e.code,
            message: e.message,
        }
    }
}

/// Reject non-2xx statuses.
pub fn check_status(status: StatusCode) -> Result<(), ClientError> {
    if status.is_success() {
        return Ok(());
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    })
}

/// Turn a raw HTTP response into the call's result.
///
/// Checks, in order: HTTP status, JSON validity, remote error object. A
/// JSON-RPC call yields its `result`; a bare call yields the whole body.
/// On both transports only a `{code, message}` object in `error` counts as
/// a remote error.
pub fn classify_response(
    format: WireFormat,
    status: StatusCode,
    body: &[u8],
) -> Result<Value, ClientError> {
    check_status(status)?;

    let value: Value = serde_json::from_slice(body).map_err(|e| ClientError::decode(body, e))?;

    match format {
        WireFormat::JsonRpc => {
            let response: JsonRpcResponse =
                serde_json::from_value(value).map_err(|e| ClientError::decode(body, e))?;
            if let Some(error) = response.error {
                return Err(error.into());
            }
            Ok(response.result.unwrap_or(Value::Null))
        }
        WireFormat::Bare => match error_object(&value) {
            Some(error) => Err(error.into()),
            None => Ok(value),
        },
    }
}

/// Leading part of a body, lossily decoded, for error messages.
fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}
