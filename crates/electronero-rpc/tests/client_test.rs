//! Integration tests for the RPC client.
//!
//! Each test starts mock wallet/daemon HTTP servers on random ports. The
//! servers record every request (path, headers, body) and answer with a
//! scripted status and body.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};

use electronero_rpc::registry::MethodGroup;
use electronero_rpc::{ClientConfig, ClientError, ElectroneroClient, ErrorKind};

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: String,
}

impl Recorded {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    body: String,
    delay: Duration,
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Mock RPC server on a random port.
struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    async fn start(status: StatusCode, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    async fn ok(body: Value) -> Self {
        Self::start(StatusCode::OK, &body.to_string()).await
    }

    async fn start_with_delay(status: StatusCode, body: &str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            status,
            body: body.to_string(),
            delay,
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("no local addr");
        let app = Router::new().fallback(record).with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server failed");
        });
        Self { addr, requests }
    }

    fn json_rpc_url(&self) -> String {
        format!("http://{}/json_rpc", self.addr)
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests()
            .pop()
            .expect("mock server received no request")
    }
}

/// Client pointing at a wallet and a daemon mock.
fn client_for(wallet: &MockServer, daemon: &MockServer) -> ElectroneroClient {
    client_with(ClientConfig::default(), wallet, daemon)
}

fn client_with(config: ClientConfig, wallet: &MockServer, daemon: &MockServer) -> ElectroneroClient {
    let config = config
        .with_wallet_url(wallet.json_rpc_url())
        .with_daemon_url(daemon.json_rpc_url());
    ElectroneroClient::new(config).expect("failed to build client")
}

// ---- Primitive calls ----

#[tokio::test]
async fn wallet_call_sends_envelope_and_returns_result() {
    let wallet = MockServer::ok(json!({
        "jsonrpc": "2.0",
        "id": 0,
        "result": {"balance": 100, "unlocked_balance": 40}
    }))
    .await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    let result = client
        .wallet("get_balance", json!({"account_index": 0}))
        .await
        .unwrap();
    assert_eq!(result, json!({"balance": 100, "unlocked_balance": 40}));

    let request = wallet.last();
    assert_eq!(request.path, "/json_rpc");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body = request.json();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["method"], "get_balance");
    assert_eq!(body["params"], json!({"account_index": 0}));
    assert!(body["id"].is_number());
    assert!(daemon.requests().is_empty());
}

#[tokio::test]
async fn daemon_path_posts_bare_params_next_to_json_rpc() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"height": 1200, "status": "OK"})).await;
    let client = client_for(&wallet, &daemon);

    let result = client.daemon("/get_info", json!({})).await.unwrap();
    assert_eq!(result, json!({"height": 1200, "status": "OK"}));

    let request = daemon.last();
    assert_eq!(request.path, "/get_info");
    assert_eq!(request.body, "{}");
}

#[tokio::test]
async fn daemon_json_rpc_call_uses_envelope() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": {"version": 65562}})).await;
    let client = client_for(&wallet, &daemon);

    let result = client.daemon("get_version", json!({})).await.unwrap();
    assert_eq!(result, json!({"version": 65562}));

    let request = daemon.last();
    assert_eq!(request.path, "/json_rpc");
    assert_eq!(request.json()["method"], "get_version");
}

#[tokio::test]
async fn unregistered_methods_still_route() {
    let wallet = MockServer::ok(json!({"result": true})).await;
    let daemon = MockServer::ok(json!({"status": "OK"})).await;
    let client = client_for(&wallet, &daemon);

    client.wallet("brand_new_method", json!({})).await.unwrap();
    assert_eq!(wallet.last().json()["method"], "brand_new_method");

    client.daemon("/brand_new_path", json!({"x": 1})).await.unwrap();
    let request = daemon.last();
    assert_eq!(request.path, "/brand_new_path");
    assert_eq!(request.json(), json!({"x": 1}));
}

#[tokio::test]
async fn caller_supplied_id_is_sent() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({"result": {}})).await;
    let client = client_for(&wallet, &daemon);

    client
        .wallet_with_id("abc", "get_height", json!({}))
        .await
        .unwrap();
    assert_eq!(wallet.last().json()["id"], "abc");

    client
        .daemon_with_id(7, "get_info", json!({}))
        .await
        .unwrap();
    assert_eq!(daemon.last().json()["id"], 7);
}

#[tokio::test]
async fn null_params_are_sent_as_empty_object() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    client.wallet("store", Value::Null).await.unwrap();
    assert_eq!(wallet.last().json()["params"], json!({}));

    client.daemon("/get_height", Value::Null).await.unwrap();
    assert_eq!(daemon.last().body, "{}");
}

#[tokio::test]
async fn daemon_bytes_returns_raw_body() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::start(StatusCode::OK, "\u{1}binary-ish").await;
    let client = client_for(&wallet, &daemon);

    let bytes = client.daemon_bytes("/get_blocks.bin", json!({})).await.unwrap();
    assert_eq!(bytes, "\u{1}binary-ish".as_bytes());
    assert_eq!(daemon.last().path, "/get_blocks.bin");
}

// ---- Generated operations ----

#[tokio::test]
async fn generated_wallet_operation_sends_wire_name() {
    let wallet = MockServer::ok(json!({"result": {"in": []}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    let result = client.call("getTransfers", json!({"in": true})).await.unwrap();
    assert_eq!(result, json!({"in": []}));

    let body = wallet.last().json();
    assert_eq!(body["method"], "get_transfers");
    assert_eq!(body["params"], json!({"in": true}));
    assert!(daemon.requests().is_empty());
}

#[tokio::test]
async fn generated_daemon_operation_sends_wire_name() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": {"blocktemplate_blob": "00"}})).await;
    let client = client_for(&wallet, &daemon);

    client
        .call("getBlockTemplate", json!({"wallet_address": "etn", "reserve_size": 60}))
        .await
        .unwrap();

    let request = daemon.last();
    assert_eq!(request.path, "/json_rpc");
    assert_eq!(request.json()["method"], "get_block_template");
}

#[tokio::test]
async fn generated_path_operation_posts_bare_json() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"pool_stats": {}, "status": "OK"})).await;
    let client = client_for(&wallet, &daemon);

    let result = client
        .call("getTransactionPoolStats", json!({"verbose": true}))
        .await
        .unwrap();
    assert_eq!(result["status"], "OK");

    let request = daemon.last();
    assert_eq!(request.path, "/get_transaction_pool_stats");
    let body = request.json();
    assert_eq!(body, json!({"verbose": true}));
    assert!(body.get("jsonrpc").is_none());
    assert!(body.get("id").is_none());
    assert!(body.get("method").is_none());
}

#[tokio::test]
async fn every_generated_operation_uses_its_group_transport() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({"result": {}})).await;
    let client = client_for(&wallet, &daemon);

    let bindings: Vec<_> = client
        .methods()
        .iter()
        .map(|(name, descriptor)| (name.to_string(), descriptor.clone()))
        .collect();

    for (name, descriptor) in bindings {
        if client.methods().overridden().any(|(n, _)| n == name) {
            continue;
        }
        client.call(&name, json!({})).await.unwrap();
        match descriptor.group {
            MethodGroup::WalletJsonRpc => {
                let request = wallet.last();
                assert_eq!(request.path, "/json_rpc", "{name}");
                assert_eq!(request.json()["method"], descriptor.wire_name.as_str(), "{name}");
            }
            MethodGroup::DaemonJsonRpc => {
                let request = daemon.last();
                assert_eq!(request.path, "/json_rpc", "{name}");
                assert_eq!(request.json()["method"], descriptor.wire_name.as_str(), "{name}");
            }
            MethodGroup::DaemonPath => {
                let request = daemon.last();
                assert_eq!(request.path, descriptor.wire_name, "{name}");
                assert_eq!(request.body, "{}", "{name}");
            }
        }
    }
}

#[tokio::test]
async fn unknown_name_is_no_such_method() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({"result": {}})).await;
    let client = client_for(&wallet, &daemon);

    let err = client.call("getEverything", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::NoSuchMethod(ref name) if name == "getEverything"));
    assert_eq!(err.kind(), ErrorKind::NoSuchMethod);
    assert!(wallet.requests().is_empty());
    assert!(daemon.requests().is_empty());
}

// ---- Explicit operations ----

#[tokio::test]
async fn explicit_block_count_wins_over_generated() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": {"count": 42, "status": "OK"}})).await;
    let client = client_for(&wallet, &daemon);

    let result = client.call("getBlockCount", json!({})).await.unwrap();
    assert_eq!(result, json!(42));
    assert_eq!(daemon.last().json()["method"], "get_block_count");

    assert_eq!(client.block_count().await.unwrap(), 42);
}

#[tokio::test]
async fn explicit_block_header_by_height_unwraps_header() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({
        "result": {"block_header": {"height": 9, "hash": "ab"}, "status": "OK"}
    }))
    .await;
    let client = client_for(&wallet, &daemon);

    let header = client
        .call("getBlockHeaderByHeight", json!({"height": 9}))
        .await
        .unwrap();
    assert_eq!(header, json!({"height": 9, "hash": "ab"}));
    let body = daemon.last().json();
    assert_eq!(body["method"], "get_block_header_by_height");
    assert_eq!(body["params"], json!({"height": 9}));
}

#[tokio::test]
async fn block_hash_sends_positional_height() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": "e4f1"})).await;
    let client = client_for(&wallet, &daemon);

    assert_eq!(client.block_hash(5).await.unwrap(), "e4f1");
    let body = daemon.last().json();
    assert_eq!(body["method"], "on_get_block_hash");
    assert_eq!(body["params"], json!([5]));

    let result = client.call("getBlockHash", json!(6)).await.unwrap();
    assert_eq!(result, json!("e4f1"));
    assert_eq!(daemon.last().json()["params"], json!([6]));
}

#[tokio::test]
async fn explicit_operation_with_bad_params_sends_nothing() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": "e4f1"})).await;
    let client = client_for(&wallet, &daemon);

    let err = client
        .call("getBlockHash", json!({"block": 1}))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParams);
    assert!(daemon.requests().is_empty());
}

#[tokio::test]
async fn typed_balance() {
    let wallet = MockServer::ok(json!({
        "result": {"balance": 5000, "unlocked_balance": 3000, "per_subaddress": []}
    }))
    .await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    let balance = client.balance(2).await.unwrap();
    assert_eq!(balance.balance, 5000);
    assert_eq!(balance.unlocked_balance, 3000);
    assert_eq!(wallet.last().json()["params"], json!({"account_index": 2}));
}

#[tokio::test]
async fn token_allowance_typed_and_by_name() {
    let wallet = MockServer::ok(json!({"result": {"allowance": 77}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    let allowance = client.token_allowance("etnTok", "etnOwner", "etnSpender").await.unwrap();
    assert_eq!(allowance, 77);
    let body = wallet.last().json();
    assert_eq!(body["method"], "token_allowance");
    assert_eq!(
        body["params"],
        json!({"token_address": "etnTok", "owner": "etnOwner", "spender": "etnSpender"})
    );

    let value = client
        .call("tokenAllowance", json!({"token_address": "t", "owner": "o", "spender": "s"}))
        .await
        .unwrap();
    assert_eq!(value, json!(77));
}

#[tokio::test]
async fn missing_result_field_is_decode_error() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::ok(json!({"result": {"status": "BUSY"}})).await;
    let client = client_for(&wallet, &daemon);

    let err = client.block_count().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn call_as_deserializes() {
    let wallet = MockServer::ok(json!({"result": {"height": 321}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    #[derive(serde::Deserialize)]
    struct Height {
        height: u64,
    }
    let height: Height = client.call_as("getHeight", json!({})).await.unwrap();
    assert_eq!(height.height, 321);
}

// ---- Error mapping ----

#[tokio::test]
async fn rpc_error_object_is_protocol_error() {
    let wallet = MockServer::start(
        StatusCode::OK,
        r#"{"error":{"code":-32601,"message":"Method not found"}}"#,
    )
    .await;
    let daemon = MockServer::ok(json!({})).await;
    let client = client_for(&wallet, &daemon);

    let err = client.wallet("nope", json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(err.rpc_code(), Some(-32601));
    match err {
        ClientError::Server { message, .. } => assert_eq!(message, "Method not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_500_is_transport_error_regardless_of_body() {
    let wallet = MockServer::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"result":{"balance":1}}"#,
    )
    .await;
    let daemon = MockServer::start(StatusCode::INTERNAL_SERVER_ERROR, "not json").await;
    let client = client_for(&wallet, &daemon);

    let err = client.wallet("get_balance", json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(500));

    let err = client.daemon("/get_info", json!({})).await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let err = client.daemon_bytes("/get_hashes.bin", json!({})).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn invalid_json_is_decode_error() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::start(StatusCode::OK, "<html>maintenance</html>").await;
    let client = client_for(&wallet, &daemon);

    let err = client.daemon("/get_info", json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("<html>maintenance</html>"));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default()
        .with_wallet_url(format!("http://{addr}/json_rpc"))
        .with_daemon_url(format!("http://{addr}/json_rpc"));
    let client = ElectroneroClient::new(config).unwrap();

    let err = client.wallet("get_balance", json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn injected_http_client_timeout_applies() {
    let wallet = MockServer::start_with_delay(
        StatusCode::OK,
        r#"{"result":{}}"#,
        Duration::from_secs(2),
    )
    .await;
    let daemon = MockServer::ok(json!({})).await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let config = ClientConfig::default()
        .with_wallet_url(wallet.json_rpc_url())
        .with_daemon_url(daemon.json_rpc_url());
    let client = ElectroneroClient::builder(config)
        .http_client(http)
        .build()
        .unwrap();

    let err = client.wallet("get_balance", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn configured_sub_second_timeout_applies() {
    let wallet = MockServer::start_with_delay(
        StatusCode::OK,
        r#"{"result":{}}"#,
        Duration::from_secs(2),
    )
    .await;
    let daemon = MockServer::ok(json!({})).await;
    let config = ClientConfig::default().with_timeout(Duration::from_millis(300));
    assert_eq!(config.timeout(), Some(Duration::from_millis(300)));
    let client = client_with(config, &wallet, &daemon);

    let started = std::time::Instant::now();
    let err = client.wallet("get_balance", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn configured_whole_second_timeout_applies() {
    let wallet = MockServer::ok(json!({})).await;
    let daemon = MockServer::start_with_delay(
        StatusCode::OK,
        r#"{"status":"OK"}"#,
        Duration::from_secs(3),
    )
    .await;
    let config = ClientConfig::from_yaml("timeout_ms: 1000\n").unwrap();
    let client = client_with(config, &wallet, &daemon);

    let err = client.daemon("/get_info", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn non_object_error_field_is_not_a_remote_error() {
    let wallet = MockServer::ok(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {"height": 77},
        "error": ""
    }))
    .await;
    let daemon = MockServer::ok(json!({"height": 77, "error": ""})).await;
    let client = client_for(&wallet, &daemon);

    let result = client.wallet("get_height", json!({})).await.unwrap();
    assert_eq!(result, json!({"height": 77}));

    let result = client.daemon("/get_height", json!({})).await.unwrap();
    assert_eq!(result["height"], 77);
}

// ---- Authentication ----

#[tokio::test]
async fn basic_auth_on_every_route() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({"result": {}})).await;
    let client = client_with(
        ClientConfig::default().with_credentials("a", "b"),
        &wallet,
        &daemon,
    );

    client.wallet("get_height", json!({})).await.unwrap();
    client.daemon("get_info", json!({})).await.unwrap();
    client.daemon("/get_info", json!({})).await.unwrap();
    client.call("getBalance", json!({})).await.unwrap();
    client.daemon_bytes("/get_hashes.bin", json!({})).await.unwrap();

    let all: Vec<_> = wallet.requests().into_iter().chain(daemon.requests()).collect();
    assert_eq!(all.len(), 5);
    for request in all {
        assert_eq!(request.authorization.as_deref(), Some("Basic YTpi"), "{}", request.path);
    }
}

#[tokio::test]
async fn username_only_still_authenticates() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let mut config = ClientConfig::default();
    config.username = Some("a".into());
    let client = client_with(config, &wallet, &daemon);

    client.wallet("get_height", json!({})).await.unwrap();
    assert_eq!(wallet.last().authorization.as_deref(), Some("Basic YTo="));
}

#[tokio::test]
async fn no_auth_header_without_credentials() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({})).await;
    let mut config = ClientConfig::default();
    config.username = Some(String::new());
    config.password = Some(String::new());
    let client = client_with(config, &wallet, &daemon);

    client.wallet("get_height", json!({})).await.unwrap();
    client.daemon("/get_info", json!({})).await.unwrap();
    assert!(wallet.last().authorization.is_none());
    assert!(daemon.last().authorization.is_none());
}

#[tokio::test]
async fn default_config_sends_no_auth_header() {
    let wallet = MockServer::ok(json!({"result": {}})).await;
    let daemon = MockServer::ok(json!({"result": {}})).await;
    let config = ClientConfig::default();
    assert!(config.username.is_none() && config.password.is_none());
    let client = client_with(config, &wallet, &daemon);

    client.wallet("get_height", json!({})).await.unwrap();
    client.daemon("get_info", json!({})).await.unwrap();
    client.daemon("/get_info", json!({})).await.unwrap();
    for request in wallet.requests().into_iter().chain(daemon.requests()) {
        assert!(request.authorization.is_none(), "{}", request.path);
    }
}

// ---- Concurrency ----

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let wallet = MockServer::ok(json!({"result": {"ok": true}})).await;
    let daemon = MockServer::ok(json!({"result": {"ok": true}})).await;
    let client = client_for(&wallet, &daemon);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    client.wallet("get_height", json!({})).await
                } else {
                    client.call("getInfo", json!({})).await
                }
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), json!({"ok": true}));
    }
    assert_eq!(wallet.requests().len(), 4);
    assert_eq!(daemon.requests().len(), 4);
}
