use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cryptolab_server::{
    app, AppState, DisabledStore, ResultSink, SimulationRecord, SqliteStore, StoreError, ToolSettings,
    MAX_TEXT_CHARS,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const TEST_TOOLS: ToolSettings = ToolSettings {
    bcrypt_cost: 4,
    rsa_bits: 1024,
};

fn router_with(store: Arc<dyn ResultSink>) -> Router {
    let state = Arc::new(AppState::new(store, TEST_TOOLS));
    app(state, &["http://localhost:3000".to_string()])
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    send_request(router, request.body(body).unwrap()).await
}

async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

/// Polls until the background write lands.
async fn wait_for_records(store: &dyn ResultSink, count: usize) -> Vec<SimulationRecord> {
    for _ in 0..200 {
        let records = store.recent(100).unwrap();
        if records.len() >= count {
            return records;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {count} stored records");
}

struct FailingSink {
    attempts: AtomicUsize,
}

impl ResultSink for FailingSink {
    fn save(&self, _record: &SimulationRecord) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Poisoned)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<SimulationRecord>, StoreError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_root_and_health() {
    let router = router_with(Arc::new(DisabledStore));

    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bienvenue sur l'API CryptoLab!");

    let (status, body) = get(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "persistence": "disabled" }));
}

#[tokio::test]
async fn test_simulate_status_codes() {
    let router = router_with(Arc::new(DisabledStore));

    let (status, body) = post(&router, "/api/simulate/unknown", json!({ "text": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("unknown")));

    let (status, body) = post(&router, "/api/simulate/des", json!({ "text": "HELLO" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("key")));

    let (status, _) = post(
        &router,
        "/api/simulate/railfence",
        json!({ "text": "ABCD", "shift": 3, "direction": "decrypt" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unreadable_body_is_validation_error() {
    let router = router_with(Arc::new(DisabledStore));

    let truncated = Request::builder()
        .method(Method::POST)
        .uri("/api/simulate/des")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text": "HELLO", "#))
        .unwrap();
    let (status, body) = send_request(&router, truncated).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let untyped = Request::builder()
        .method(Method::POST)
        .uri("/api/simulate/des")
        .body(Body::from(json!({ "text": "HELLO", "key": "KEY" }).to_string()))
        .unwrap();
    let (status, body) = send_request(&router, untyped).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let untyped = Request::builder()
        .method(Method::POST)
        .uri("/api/hash/sha256")
        .body(Body::from(r#"{"text": "abc"}"#))
        .unwrap();
    let (status, body) = send_request(&router, untyped).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_simulate_rejects_long_text() {
    let router = router_with(Arc::new(DisabledStore));
    let text = "A".repeat(MAX_TEXT_CHARS + 1);

    let (status, body) = post(&router, "/api/simulate/railfence", json!({ "text": text, "shift": 3 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("at most")));
}

#[tokio::test]
async fn test_simulate_persists_result() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let router = router_with(store.clone());

    let (status, body) = post(&router, "/api/simulate/des", json!({ "text": "HELLO", "key": "KEY" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "des");
    assert_eq!(body["final_result_hex"], "875BBED6FDD5C306");

    let records = wait_for_records(store.as_ref(), 1).await;
    assert_eq!(records[0].algorithm, "des");
    assert_eq!(records[0].action, "simulate");
    assert_eq!(records[0].input_text, "HELLO");
    assert_eq!(records[0].output_text, "875BBED6FDD5C306");

    let (status, body) = get(&router, "/api/history?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["output_text"], "875BBED6FDD5C306");
}

#[tokio::test]
async fn test_persistence_failure_does_not_affect_response() {
    let sink = Arc::new(FailingSink {
        attempts: AtomicUsize::new(0),
    });
    let router = router_with(sink.clone());

    let (status, body) = post(&router, "/api/simulate/caesar", json!({ "text": "abc", "shift": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["final_result"], "bcd");

    for _ in 0..200 {
        if sink.attempts.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_classical_actions() {
    let router = router_with(Arc::new(DisabledStore));

    let (status, body) = post(
        &router,
        "/api/classical/caesar/encrypt",
        json!({ "text": "Hello, World!", "shift": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "algorithm": "caesar", "action": "encrypt", "cipher": "Khoor, Zruog!" }));

    let (_, body) = post(
        &router,
        "/api/classical/vigenere/decrypt",
        json!({ "text": "LXFOPVEFRNHR", "key": "LEMON" }),
    )
    .await;
    assert_eq!(body["plain"], "ATTACKATDAWN");

    let (status, _) = post(&router, "/api/classical/caesar/rotate", json!({ "text": "a", "shift": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&router, "/api/classical/aes/encrypt", json!({ "text": "a", "key": "k" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_modern_roundtrips() {
    let router = router_with(Arc::new(DisabledStore));

    let (status, sealed) = post(&router, "/api/modern/aes/encrypt", json!({ "text": "lab", "key": "pass" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sealed["algorithm"], "aes-gcm");

    let (_, opened) = post(
        &router,
        "/api/modern/aes/decrypt",
        json!({
            "cipher_hex": sealed["cipher_hex"],
            "key": "pass",
            "nonce_hex": sealed["nonce_hex"],
            "tag_hex": sealed["tag_hex"],
        }),
    )
    .await;
    assert_eq!(opened["success"], true);
    assert_eq!(opened["plain"], "lab");

    let (_, sealed) = post(&router, "/api/modern/des/encrypt", json!({ "text": "lab", "key": "pass" })).await;
    assert_eq!(sealed["algorithm"], "des-cbc");
    let (status, opened) = post(
        &router,
        "/api/modern/des/decrypt",
        json!({ "cipher_hex": sealed["cipher_hex"], "key": "wrong", "iv_hex": sealed["iv_hex"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // A wrong DES key almost never yields valid padding and UTF-8.
    if opened["success"] == false {
        assert!(opened["error"].is_string());
    }
}

#[tokio::test]
async fn test_hash_routes() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let router = router_with(store.clone());

    let (_, body) = post(&router, "/api/hash/sha256", json!({ "text": "abc" })).await;
    assert_eq!(
        body["hash"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(body["input"], "abc");

    let (_, hashed) = post(&router, "/api/hash/bcrypt", json!({ "text": "hunter2" })).await;
    let hash = hashed["hash"].as_str().unwrap().to_string();
    assert!(hash.starts_with("$2"));

    let (_, verified) = post(
        &router,
        "/api/hash/bcrypt/verify",
        json!({ "text": "hunter2", "hashed_text": hash }),
    )
    .await;
    assert_eq!(verified["match"], true);

    let (_, verified) = post(
        &router,
        "/api/hash/bcrypt/verify",
        json!({ "text": "hunter2", "hashed_text": "garbage" }),
    )
    .await;
    assert_eq!(verified["match"], false);

    let records = wait_for_records(store.as_ref(), 2).await;
    let bcrypt = records.iter().find(|r| r.algorithm == "bcrypt").unwrap();
    assert_eq!(bcrypt.input_text, "[redacted]");
    assert!(records.iter().all(|r| r.input_text != "hunter2"));
}

#[tokio::test]
async fn test_rsa_routes() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let router = router_with(store.clone());

    let (status, keys) = get(&router, "/api/asymmetric/rsa/generate-keys").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(keys["algorithm"], "rsa-1024");

    let (_, sealed) = post(
        &router,
        "/api/asymmetric/rsa/encrypt",
        json!({ "text": "hi", "public_key": keys["public_key"] }),
    )
    .await;
    assert_eq!(sealed["success"], true);

    let (_, opened) = post(
        &router,
        "/api/asymmetric/rsa/decrypt",
        json!({ "cipher_hex": sealed["cipher_hex"], "private_key": keys["private_key"] }),
    )
    .await;
    assert_eq!(opened["plain"], "hi");

    let (status, failed) = post(
        &router,
        "/api/asymmetric/rsa/encrypt",
        json!({ "text": "hi", "public_key": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(failed["success"], false);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.recent(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let router = router_with(Arc::new(DisabledStore));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/simulate/caesar")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
