use axum::Json;
use utoipa::OpenApi;

use super::dto::{
    BugDto, BugListResponse, BugResponse, CreateBugReq, EmptyResponse, ErrorResponse,
    StatusResponse, UpdateBugReq,
};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Bug Tracker API", description = "CRUD over bug records"),
    paths(
        handlers::api_status,
        handlers::list_bugs,
        handlers::get_bug,
        handlers::create_bug,
        handlers::update_bug,
        handlers::delete_bug,
    ),
    components(schemas(
        BugDto,
        CreateBugReq,
        UpdateBugReq,
        BugResponse,
        BugListResponse,
        EmptyResponse,
        ErrorResponse,
        StatusResponse,
    )),
    tags(
        (name = "bugs", description = "Bug records"),
        (name = "status", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
