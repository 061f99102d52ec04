use bugs_sdk::{Bug, BugDraft, BugPatch};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// REST DTO for a bug record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BugDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// One of `open`, `in-progress`, `resolved`.
    pub status: String,
    /// One of `low`, `medium`, `high`.
    pub priority: String,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Bug> for BugDto {
    fn from(bug: Bug) -> Self {
        Self {
            id: bug.id,
            title: bug.title,
            description: bug.description,
            status: bug.status.as_str().to_owned(),
            priority: bug.priority.as_str().to_owned(),
            created_by: bug.created_by,
            created_at: bug.created_at,
            updated_at: bug.updated_at,
        }
    }
}

/// Body of `POST /api/bugs`.
///
/// Every field is optional at the wire level so that missing fields reach
/// the validation gate and are reported together.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBugReq {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl From<CreateBugReq> for BugDraft {
    fn from(req: CreateBugReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            created_by: req.created_by,
        }
    }
}

/// Body of `PUT /api/bugs/{id}`: only supplied fields change.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBugReq {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl From<UpdateBugReq> for BugPatch {
    fn from(req: UpdateBugReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            created_by: req.created_by,
        }
    }
}

// Envelope shapes, documentation only.

#[derive(Debug, Serialize, ToSchema)]
pub struct BugResponse {
    pub success: bool,
    pub data: BugDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BugListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<BugDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Present only when the server runs in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub message: String,
}

#[cfg(test)]
#[path = "dto_test.rs"]
mod dto_test;
