#![allow(dead_code, clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use bugs::{BugsConfig, BugsModule};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh in-memory `SQLite` database with the bugs schema applied.
///
/// The pool is pinned to a single connection: every `SQLite` memory
/// connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    BugsModule::migrate(&db).await.unwrap();
    db
}

pub async fn module(config: BugsConfig) -> BugsModule {
    BugsModule::new(memory_db().await, config)
}

pub fn dev_config() -> BugsConfig {
    BugsConfig {
        expose_error_stack: true,
        enable_docs: true,
        request_timeout_secs: 30,
    }
}

pub fn sample_bug() -> Value {
    serde_json::json!({
        "title": "Test Bug",
        "description": "Test Description",
        "status": "open",
        "priority": "high",
        "createdBy": "Test User"
    })
}

/// Send one request through the router and decode the JSON body.
pub async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(router, request).await
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
