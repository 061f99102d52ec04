use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use bugs_sdk::{BugsError, SuccessEnvelope};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::service::Service;

use super::dto::{
    BugDto, BugListResponse, BugResponse, CreateBugReq, EmptyResponse, ErrorResponse,
    StatusResponse, UpdateBugReq,
};
use super::error::{ApiError, ApiResult};

/// Identifiers that are not UUIDs cannot name a stored bug.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| BugsError::bug_not_found(raw).into())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "API is running", body = StatusResponse))
)]
pub async fn api_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Bug Tracker API is running".to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/api/bugs",
    tag = "bugs",
    responses(
        (status = 200, description = "All bugs, newest first", body = BugListResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn list_bugs(
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<SuccessEnvelope<Vec<BugDto>>>> {
    let bugs = svc.list_bugs().await?;
    let dtos = bugs.into_iter().map(BugDto::from).collect();
    Ok(Json(SuccessEnvelope::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/bugs/{id}",
    tag = "bugs",
    params(("id" = String, Path, description = "Bug id")),
    responses(
        (status = 200, description = "The bug", body = BugResponse),
        (status = 404, description = "No bug with this id", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn get_bug(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessEnvelope<BugDto>>> {
    let bug = svc.get_bug(parse_id(&id)?).await?;
    Ok(Json(SuccessEnvelope::new(bug.into())))
}

#[utoipa::path(
    post,
    path = "/api/bugs",
    tag = "bugs",
    request_body = CreateBugReq,
    responses(
        (status = 201, description = "Bug created", body = BugResponse),
        (status = 400, description = "Validation failed; message is the field error map", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn create_bug(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<CreateBugReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SuccessEnvelope<BugDto>>)> {
    let Json(req) = body?;
    let bug = svc.create_bug(req.into()).await?;
    Ok((StatusCode::CREATED, Json(SuccessEnvelope::new(bug.into()))))
}

#[utoipa::path(
    put,
    path = "/api/bugs/{id}",
    tag = "bugs",
    params(("id" = String, Path, description = "Bug id")),
    request_body = UpdateBugReq,
    responses(
        (status = 200, description = "Bug updated", body = BugResponse),
        (status = 400, description = "Merged record failed validation", body = ErrorResponse),
        (status = 404, description = "No bug with this id", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn update_bug(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBugReq>, JsonRejection>,
) -> ApiResult<Json<SuccessEnvelope<BugDto>>> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let bug = svc.update_bug(id, req.into()).await?;
    Ok(Json(SuccessEnvelope::new(bug.into())))
}

#[utoipa::path(
    delete,
    path = "/api/bugs/{id}",
    tag = "bugs",
    params(("id" = String, Path, description = "Bug id")),
    responses(
        (status = 200, description = "Bug deleted; data is an empty object", body = EmptyResponse),
        (status = 404, description = "No bug with this id", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn delete_bug(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessEnvelope<Value>>> {
    svc.delete_bug(parse_id(&id)?).await?;
    Ok(Json(SuccessEnvelope::new(Value::Object(Map::new()))))
}
