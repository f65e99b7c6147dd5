//! JSON-RPC 2.0 wire types and typed results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID (number or string).
    pub id: Value,
    /// Wire name of the remote method.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: Value, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 response object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Set only when the `error` field is a `{code, message}` object.
    #[serde(
        default,
        deserialize_with = "lenient_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<JsonRpcError>,
}

/// Remote error carried in a response's `error` field.
///
/// Anything that is not a well-formed `{code, message}` object (`""`,
/// `null`, `false`, ...) is not an error.
pub fn error_object(value: &Value) -> Option<JsonRpcError> {
    value
        .get("error")
        .and_then(|e| JsonRpcError::deserialize(e).ok())
}

fn lenient_error<'de, D: Deserializer<'de>>(d: D) -> Result<Option<JsonRpcError>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(JsonRpcError::deserialize(&value).ok())
}

/// Error object reported by the remote service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Wallet balance for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Balance {
    /// Total balance in atomic units.
    pub balance: u64,
    /// Spendable part of the balance in atomic units.
    pub unlocked_balance: u64,
}

/// Request ID derived from the wall clock (milliseconds since the Unix epoch).
pub fn clock_id() -> Value {
    Value::from(chrono::Utc::now().timestamp_millis())
}

/// Params as sent on the wire: `null` becomes `{}`.
pub(crate) fn params_or_empty(params: Value) -> Value {
    match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    }
}
