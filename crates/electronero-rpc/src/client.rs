//! HTTP client for the Electronero wallet and daemon RPC services.
//!
//! Two primitive calls, [`ElectroneroClient::wallet`] and
//! [`ElectroneroClient::daemon`], plus [`ElectroneroClient::call`], which
//! dispatches a canonical name (`getBalance`, `getInfo`, ...) through the
//! table built from the method registry.
//!
//! Authentication is sent via the `Authorization: Basic <...>` HTTP header.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::BasicAuth;
use crate::config::{ClientConfig, ConfigError};
use crate::dispatch::{DispatchTable, ExplicitMethod, Resolved};
use crate::error::{check_status, classify_response, ClientError};
use crate::registry::{MethodDescriptor, MethodGroup, MethodRegistry};
use crate::router::{Route, Router, WireFormat};
use crate::types::{clock_id, params_or_empty, Balance, JsonRpcRequest};

/// Builder for [`ElectroneroClient`].
pub struct ClientBuilder {
    config: ClientConfig,
    registry: Option<MethodRegistry>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Use a custom catalog instead of the built-in one.
    pub fn registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a caller-built HTTP client. Its own timeout settings apply and
    /// `ClientConfig::timeout_ms` is ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<ElectroneroClient, ClientError> {
        let config = self.config;
        config.validate()?;

        let registry = match self.registry {
            Some(registry) => registry,
            None => MethodRegistry::electronero()?,
        };

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = config.timeout() {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(ConfigError::HttpClient)?
            }
        };

        let auth_header =
            BasicAuth::from_parts(config.username.as_deref(), config.password.as_deref())
                .map(|auth| auth.header_value())
                .transpose()
                .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;

        let table = DispatchTable::build(&registry);
        let router = Router::new(&config.wallet_url, &config.daemon_url);

        Ok(ElectroneroClient {
            inner: Arc::new(Inner {
                config,
                registry,
                table,
                router,
                auth_header,
            }),
            http,
        })
    }
}

struct Inner {
    config: ClientConfig,
    registry: MethodRegistry,
    table: DispatchTable,
    router: Router,
    auth_header: Option<HeaderValue>,
}

/// Client for the Electronero wallet and daemon RPC services.
///
/// Cheap to clone; clones share the immutable configuration, registry and
/// dispatch table.
#[derive(Clone)]
pub struct ElectroneroClient {
    inner: Arc<Inner>,
    http: reqwest::Client,
}

impl std::fmt::Debug for ElectroneroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElectroneroClient")
            .field("config", &self.inner.config)
            .field("methods", &self.inner.table.len())
            .finish()
    }
}

impl ElectroneroClient {
    /// Client with the built-in catalog and a default HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            registry: None,
            http: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.inner.registry
    }

    /// Generated operations, keyed by canonical name.
    pub fn methods(&self) -> &DispatchTable {
        &self.inner.table
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    /// Registered wallet wire names.
    pub fn list_wallet_methods(&self) -> Vec<&str> {
        self.registry().wire_names(MethodGroup::WalletJsonRpc).collect()
    }

    /// Registered daemon wire names: JSON-RPC methods, then paths.
    pub fn list_daemon_methods(&self) -> Vec<&str> {
        self.registry()
            .wire_names(MethodGroup::DaemonJsonRpc)
            .chain(self.registry().wire_names(MethodGroup::DaemonPath))
            .collect()
    }

    /// Call a wallet JSON-RPC method, registered or not.
    pub async fn wallet<P: Serialize>(&self, method: &str, params: P) -> Result<Value, ClientError> {
        self.wallet_with_id(clock_id(), method, params).await
    }

    /// [`Self::wallet`] with a caller-chosen request id.
    pub async fn wallet_with_id<P: Serialize>(
        &self,
        id: impl Into<Value>,
        method: &str,
        params: P,
    ) -> Result<Value, ClientError> {
        let route = self.inner.router.wallet(method);
        self.send(&route, id.into(), serde_json::to_value(params)?)
            .await
    }

    /// Call a daemon method, registered or not.
    ///
    /// Names starting with `/` are POSTed as bare JSON to the matching path;
    /// anything else goes through the daemon's JSON-RPC endpoint.
    pub async fn daemon<P: Serialize>(&self, method: &str, params: P) -> Result<Value, ClientError> {
        self.daemon_with_id(clock_id(), method, params).await
    }

    /// [`Self::daemon`] with a caller-chosen request id. Path methods carry
    /// no id.
    pub async fn daemon_with_id<P: Serialize>(
        &self,
        id: impl Into<Value>,
        method: &str,
        params: P,
    ) -> Result<Value, ClientError> {
        let route = self.inner.router.daemon(method);
        self.send(&route, id.into(), serde_json::to_value(params)?)
            .await
    }

    /// Call a daemon path and return the undecoded response body.
    ///
    /// Meant for the `.bin` endpoints, whose payloads are not JSON. Only the
    /// HTTP status is checked.
    pub async fn daemon_bytes<P: Serialize>(
        &self,
        path: &str,
        params: P,
    ) -> Result<Vec<u8>, ClientError> {
        let route = self.inner.router.daemon(path);
        let response = self
            .post(&route, clock_id(), serde_json::to_value(params)?)
            .await?;
        check_status(response.status())?;
        let body = response.bytes().await.map_err(ClientError::from_reqwest)?;
        Ok(body.to_vec())
    }

    /// Call an operation by canonical name.
    ///
    /// Explicit operations are looked up first, then the ones generated from
    /// the registry. Unknown names fail with [`ClientError::NoSuchMethod`].
    pub async fn call<P: Serialize>(&self, name: &str, params: P) -> Result<Value, ClientError> {
        let params = serde_json::to_value(params)?;
        match self.inner.table.resolve(name) {
            Some(Resolved::Explicit(method)) => self.call_explicit(method, params).await,
            Some(Resolved::Generated(descriptor)) => self.invoke(descriptor, params).await,
            None => Err(ClientError::NoSuchMethod(name.to_string())),
        }
    }

    /// [`Self::call`], deserializing the result.
    pub async fn call_as<P: Serialize, R: DeserializeOwned>(
        &self,
        name: &str,
        params: P,
    ) -> Result<R, ClientError> {
        let result = self.call(name, params).await?;
        decode_value(result)
    }

    /// Call a registry entry over its own transport.
    pub async fn invoke(
        &self,
        descriptor: &MethodDescriptor,
        params: Value,
    ) -> Result<Value, ClientError> {
        let route = self
            .inner
            .router
            .route(descriptor.group, &descriptor.wire_name);
        self.send(&route, clock_id(), params).await
    }

    /// Current chain height according to the daemon.
    pub async fn block_count(&self) -> Result<u64, ClientError> {
        let result = self.daemon("get_block_count", json!({})).await?;
        decode_value(take_field(result, "count")?)
    }

    /// Header of the block at `height`.
    pub async fn block_header_by_height(&self, height: u64) -> Result<Value, ClientError> {
        let result = self
            .daemon("get_block_header_by_height", json!({ "height": height }))
            .await?;
        take_field(result, "block_header")
    }

    /// Hash of the block at `height`.
    pub async fn block_hash(&self, height: u64) -> Result<String, ClientError> {
        let result = self.daemon("on_get_block_hash", json!([height])).await?;
        decode_value(result)
    }

    /// Balance of one wallet account.
    pub async fn balance(&self, account_index: u32) -> Result<Balance, ClientError> {
        let result = self
            .wallet("get_balance", json!({ "account_index": account_index }))
            .await?;
        decode_value(result)
    }

    /// Amount `spender` may still move from `owner`'s balance of a token.
    pub async fn token_allowance(
        &self,
        token_address: &str,
        owner: &str,
        spender: &str,
    ) -> Result<u64, ClientError> {
        let params = json!({
            "token_address": token_address,
            "owner": owner,
            "spender": spender,
        });
        let allowance = self.token_allowance_value(params).await?;
        decode_value(allowance)
    }

    async fn token_allowance_value(&self, params: Value) -> Result<Value, ClientError> {
        let result = self.wallet("token_allowance", params).await?;
        take_field(result, "allowance")
    }

    async fn call_explicit(
        &self,
        method: ExplicitMethod,
        params: Value,
    ) -> Result<Value, ClientError> {
        match method {
            ExplicitMethod::GetBlockCount => self.block_count().await.map(Value::from),
            ExplicitMethod::GetBlockHeaderByHeight => {
                self.block_header_by_height(height_param(&params)?).await
            }
            ExplicitMethod::GetBlockHash => {
                self.block_hash(height_param(&params)?).await.map(Value::from)
            }
            ExplicitMethod::TokenAllowance => self.token_allowance_value(params).await,
            ExplicitMethod::ListWalletMethods => Ok(Value::from(self.list_wallet_methods())),
            ExplicitMethod::ListDaemonMethods => Ok(Value::from(self.list_daemon_methods())),
        }
    }

    /// Send one request and classify the response.
    async fn send(&self, route: &Route, id: Value, params: Value) -> Result<Value, ClientError> {
        let response = self.post(route, id, params).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::from_reqwest)?;
        classify_response(route.format, status, &body)
    }

    /// Low-level: build the body for the route and POST it.
    async fn post(
        &self,
        route: &Route,
        id: Value,
        params: Value,
    ) -> Result<reqwest::Response, ClientError> {
        let params = params_or_empty(params);
        let body = match route.format {
            WireFormat::JsonRpc => {
                serde_json::to_vec(&JsonRpcRequest::new(id, route.method.as_str(), params))?
            }
            WireFormat::Bare => serde_json::to_vec(&params)?,
        };

        debug!(method = %route.method, url = %route.url, "sending RPC request");

        let mut request = self
            .http
            .post(&route.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
        if let Some(auth) = &self.inner.auth_header {
            request = request.header(AUTHORIZATION, auth.clone());
        }

        request.send().await.map_err(ClientError::from_reqwest)
    }
}

/// `height` from either a bare number or `{"height": n}`.
fn height_param(params: &Value) -> Result<u64, ClientError> {
    params
        .as_u64()
        .or_else(|| params.get("height").and_then(Value::as_u64))
        .ok_or_else(|| {
            ClientError::InvalidParams("expected `height` as a non-negative integer".into())
        })
}

/// Remove one field from an object result.
fn take_field(result: Value, name: &str) -> Result<Value, ClientError> {
    let missing = |result: &Value| {
        ClientError::decode(result.to_string().as_bytes(), format!("missing field `{name}`"))
    };
    match result {
        Value::Object(mut map) => match map.remove(name) {
            Some(value) => Ok(value),
            None => Err(missing(&Value::Object(map))),
        },
        other => Err(missing(&other)),
    }
}

fn decode_value<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
    let rendered = value.to_string();
    serde_json::from_value(value).map_err(|e| ClientError::decode(rendered.as_bytes(), e))
}
