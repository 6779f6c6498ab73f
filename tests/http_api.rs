//! HTTP API Tests
//!
//! Drive the router end to end with in-process requests. The response
//! contract is two-valued: 200 with `{message, value?}` on success, 500
//! with `{error}` on any caught failure. A missing key is not a 404.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docgate::config::GatewayConfig;
use docgate::http_server::HttpServer;
use docgate::store::{MemoryStore, StoreClient};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn gateway(config: GatewayConfig) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let router = HttpServer::with_client(config, store.clone()).router();
    (store, router)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_direct_round_trip() {
    let (_store, router) = gateway(GatewayConfig::default());

    let (status, body) = send(
        &router,
        "POST",
        "/",
        Some(json!({"_key": "dhbw", "name": "DHBW", "location": "Stuttgart"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully inserted 'dhbw'"}));

    let (status, body) = send(&router, "GET", "/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Successfully received 'dhbw'",
            "value": {"_key": "dhbw", "name": "DHBW", "location": "Stuttgart"}
        })
    );
}

#[tokio::test]
async fn test_query_read_returns_sequence() {
    let (_store, router) = gateway(GatewayConfig::default());

    send(&router, "POST", "/aql", Some(json!({"_key": "dhbw", "name": "DHBW"}))).await;

    let (status, body) = send(&router, "GET", "/aql/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Successfully received 'dhbw'",
            "value": [{"_key": "dhbw", "name": "DHBW"}]
        })
    );

    // Missing key: empty sequence with 200, not an error.
    let (status, body) = send(&router, "GET", "/aql/missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], json!([]));
}

#[tokio::test]
async fn test_update_then_delete_then_read() {
    let (_store, router) = gateway(GatewayConfig::default());

    send(
        &router,
        "POST",
        "/",
        Some(json!({"_key": "dhbw", "name": "DHBW", "location": "Stuttgart"})),
    )
    .await;

    let (status, body) =
        send(&router, "PATCH", "/dhbw", Some(json!({"location": "Heilbronn"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully updated 'dhbw'"}));

    let (_, body) = send(&router, "GET", "/dhbw", None).await;
    assert_eq!(body["value"]["location"], json!("Heilbronn"));
    assert_eq!(body["value"]["name"], json!("DHBW"));

    let (status, body) = send(&router, "DELETE", "/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully removed 'dhbw'"}));

    // Deleted key on the direct path: 500 with the store's error text.
    let (status, body) = send(&router, "GET", "/dhbw", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "document 'dhbw' not found"}));
}

#[tokio::test]
async fn test_query_path_mutations() {
    let (_store, router) = gateway(GatewayConfig::default());

    send(&router, "POST", "/aql", Some(json!({"_key": "dhbw", "name": "DHBW"}))).await;

    let (status, _) =
        send(&router, "PATCH", "/aql/dhbw", Some(json!({"location": "Stuttgart"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, "DELETE", "/aql/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Successfully removed 'dhbw'"}));

    let (status, body) = send(&router, "GET", "/aql/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], json!([]));
}

#[tokio::test]
async fn test_duplicate_insert_honors_ignore_errors_config() {
    // Strict: duplicate through the query path is a 500.
    let (_store, router) = gateway(GatewayConfig::default());
    send(&router, "POST", "/aql", Some(json!({"_key": "dhbw"}))).await;
    let (status, body) = send(&router, "POST", "/aql", Some(json!({"_key": "dhbw"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "unique constraint violated on key 'dhbw'"}));

    // Lenient: the same duplicate is skipped silently.
    let config: GatewayConfig =
        serde_json::from_str(r#"{"query": {"ignore_errors": true}}"#).unwrap();
    let (_store, router) = gateway(config);
    send(&router, "POST", "/aql", Some(json!({"_key": "dhbw", "name": "DHBW"}))).await;
    let (status, _) =
        send(&router, "POST", "/aql", Some(json!({"_key": "dhbw", "name": "other"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&router, "GET", "/aql/dhbw", None).await;
    assert_eq!(body["value"], json!([{"_key": "dhbw", "name": "DHBW"}]));
}

#[tokio::test]
async fn test_unreachable_store_fails_every_route() {
    let (store, router) = gateway(GatewayConfig::default());
    store.set_reachable(false);

    let cases = [
        ("POST", "/", Some(json!({"_key": "dhbw"}))),
        ("POST", "/aql", Some(json!({"_key": "dhbw"}))),
        ("GET", "/dhbw", None),
        ("GET", "/aql/dhbw", None),
        ("PATCH", "/dhbw", Some(json!({"location": "Heilbronn"}))),
        ("PATCH", "/aql/dhbw", Some(json!({"location": "Heilbronn"}))),
        ("DELETE", "/dhbw", None),
        ("DELETE", "/aql/dhbw", None),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert!(
            response["error"]
                .as_str()
                .unwrap()
                .contains("store unreachable"),
            "{} {} -> {:?}",
            method,
            uri,
            response
        );
    }

    // Provisioning short-circuited: nothing was created while unreachable.
    store.set_reachable(true);
    assert!(!store.database_exists("myDatabase").await.unwrap());
}

#[tokio::test]
async fn test_provisioning_runs_fresh_on_each_request() {
    let (store, router) = gateway(GatewayConfig::default());

    // First request provisions database and collection.
    send(&router, "POST", "/", Some(json!({"_key": "dhbw"}))).await;
    assert!(store.collection_exists("myDatabase", "myCollection").await.unwrap());

    // Later requests re-derive handles and still succeed.
    let (status, _) = send(&router, "GET", "/dhbw", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_without_key_generates_one() {
    let (_store, router) = gateway(GatewayConfig::default());

    let (status, body) = send(&router, "POST", "/", Some(json!({"name": "DHBW"}))).await;
    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().unwrap();
    let key = message
        .strip_prefix("Successfully inserted '")
        .and_then(|s| s.strip_suffix('\''))
        .unwrap();
    assert!(!key.is_empty());

    let (status, body) = send(&router, "GET", &format!("/{}", key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"]["name"], json!("DHBW"));
}
