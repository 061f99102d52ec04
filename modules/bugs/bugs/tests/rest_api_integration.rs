#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the bugs REST API over an in-memory database.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use bugs::BugsConfig;
use serde_json::json;
use uuid::Uuid;

use common::{call, dev_config, module, sample_bug, send};

async fn create(router: &axum::Router, body: serde_json::Value) -> serde_json::Value {
    let (status, json) = call(router, Method::POST, "/api/bugs", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["data"].clone()
}

#[tokio::test]
async fn root_reports_api_is_running() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(&router, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "Bug Tracker API is running"}));
}

#[tokio::test]
async fn list_is_empty_when_no_bugs_exist() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(&router, Method::GET, "/api/bugs", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "count": 0, "data": []}));
}

#[tokio::test]
async fn list_returns_every_bug_newest_first() {
    let router = module(BugsConfig::default()).await.router();
    let first = create(&router, sample_bug()).await;
    let mut second = sample_bug();
    second["title"] = json!("Test Bug 2");
    second["status"] = json!("in-progress");
    let second = create(&router, second).await;

    let (status, json) = call(&router, Method::GET, "/api/bugs", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    let ids: Vec<&serde_json::Value> = json["data"].as_array().unwrap().iter().map(|b| &b["id"]).collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);
}

#[tokio::test]
async fn create_returns_201_with_stored_record() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(&router, Method::POST, "/api/bugs", Some(sample_bug())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert!(json.get("count").is_none());
    let data = &json["data"];
    assert_eq!(data["title"], "Test Bug");
    assert_eq!(data["createdBy"], "Test User");
    assert_eq!(data["createdAt"], data["updatedAt"]);

    let id = data["id"].as_str().unwrap();
    let (status, fetched) = call(&router, Method::GET, &format!("/api/bugs/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], data);
}

#[tokio::test]
async fn create_applies_defaults() {
    let router = module(BugsConfig::default()).await.router();

    let data = create(
        &router,
        json!({"title": "No enums", "description": "d", "createdBy": "Ada"}),
    )
    .await;

    assert_eq!(data["status"], "open");
    assert_eq!(data["priority"], "medium");
}

#[tokio::test]
async fn create_without_title_is_bad_request() {
    let router = module(BugsConfig::default()).await.router();
    let mut body = sample_bug();
    body.as_object_mut().unwrap().remove("title");

    let (status, json) = call(&router, Method::POST, "/api/bugs", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    let errors: serde_json::Value =
        serde_json::from_str(json["message"].as_str().unwrap()).unwrap();
    assert_eq!(errors, json!({"title": "Title is required"}));
    assert!(json.get("stack").is_none());
}

#[tokio::test]
async fn create_with_invalid_status_is_bad_request() {
    let router = module(BugsConfig::default()).await.router();
    let mut body = sample_bug();
    body["status"] = json!("invalid-status");

    let (status, json) = call(&router, Method::POST, "/api/bugs", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("Status must be one of"));

    let (_, list) = call(&router, Method::GET, "/api/bugs", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let router = module(BugsConfig::default()).await.router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bugs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let (status, json) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let router = module(BugsConfig::default()).await.router();
    let missing = Uuid::now_v7();

    let (status, json) = call(&router, Method::GET, &format!("/api/bugs/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], format!("Bug not found with id of {missing}"));

    let (status, json) = call(&router, Method::GET, "/api/bugs/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Bug not found with id of not-a-uuid");
}

#[tokio::test]
async fn update_merges_partial_data() {
    let router = module(BugsConfig::default()).await.router();
    let created = create(&router, sample_bug()).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = call(
        &router,
        Method::PUT,
        &format!("/api/bugs/{id}"),
        Some(json!({"title": "Updated Bug", "status": "in-progress"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["title"], "Updated Bug");
    assert_eq!(json["data"]["status"], "in-progress");
    assert_eq!(json["data"]["description"], created["description"]);
    assert_eq!(json["data"]["createdAt"], created["createdAt"]);

    let (_, fetched) = call(&router, Method::GET, &format!("/api/bugs/{id}"), None).await;
    assert_eq!(fetched["data"]["title"], "Updated Bug");
    assert_eq!(fetched["data"]["status"], "in-progress");
}

#[tokio::test]
async fn update_with_empty_status_keeps_stored_status() {
    let router = module(BugsConfig::default()).await.router();
    let mut body = sample_bug();
    body["status"] = json!("in-progress");
    let created = create(&router, body).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = call(
        &router,
        Method::PUT,
        &format!("/api/bugs/{id}"),
        Some(json!({"status": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "in-progress");
    let (_, fetched) = call(&router, Method::GET, &format!("/api/bugs/{id}"), None).await;
    assert_eq!(fetched["data"]["status"], "in-progress");
}

#[tokio::test]
async fn update_with_empty_body_returns_record_unchanged() {
    let router = module(BugsConfig::default()).await.router();
    let created = create(&router, sample_bug()).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = call(&router, Method::PUT, &format!("/api/bugs/{id}"), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created);
}

#[tokio::test]
async fn update_unknown_bug_is_not_found() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(
        &router,
        Method::PUT,
        &format!("/api/bugs/{}", Uuid::now_v7()),
        Some(json!({"title": "Updated Bug"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn update_with_invalid_data_is_bad_request_and_keeps_record() {
    let router = module(BugsConfig::default()).await.router();
    let created = create(&router, sample_bug()).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = call(
        &router,
        Method::PUT,
        &format!("/api/bugs/{id}"),
        Some(json!({"status": "invalid-status"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (_, fetched) = call(&router, Method::GET, &format!("/api/bugs/{id}"), None).await;
    assert_eq!(fetched["data"], created);
}

#[tokio::test]
async fn delete_removes_bug() {
    let router = module(BugsConfig::default()).await.router();
    let created = create(&router, sample_bug()).await;
    let uri = format!("/api/bugs/{}", created["id"].as_str().unwrap());

    let (status, json) = call(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "data": {}}));

    let (status, _) = call(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = call(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found_envelope() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(&router, Method::GET, "/api/widgets", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({"success": false, "message": "Route not found: /api/widgets"})
    );
}

#[tokio::test]
async fn unsupported_method_is_not_found_envelope() {
    let router = module(BugsConfig::default()).await.router();

    let (status, json) = call(&router, Method::PATCH, "/api/bugs", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({"success": false, "message": "Route not found: /api/bugs"})
    );
}

#[tokio::test]
async fn stack_is_exposed_only_in_development() {
    let dev = module(dev_config()).await.router();
    let (_, json) = call(&dev, Method::GET, "/api/bugs/nope", None).await;
    assert!(
        json["stack"]
            .as_str()
            .is_some_and(|s| s.starts_with("NotFound: Bug not found"))
    );

    let prod = module(BugsConfig::default()).await.router();
    let (_, json) = call(&prod, Method::GET, "/api/bugs/nope", None).await;
    assert!(json.get("stack").is_none());
}

#[tokio::test]
async fn openapi_document_is_served_when_enabled() {
    let router = module(dev_config()).await.router();
    let (status, json) = call(&router, Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/bugs/{id}"].is_object());

    let router = module(BugsConfig::default()).await.router();
    let (status, _) = call(&router, Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
