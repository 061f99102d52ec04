//! Remote `BugsClientV1` over the bugs REST API.
//!
//! Candidate records are checked with the shared validation gate before any
//! request is sent, so obviously invalid input never leaves the process.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::client::BugsClientV1;
use crate::envelope::{ErrorEnvelope, SuccessEnvelope};
use crate::errors::{BugsError, ErrorKind};
use crate::models::{Bug, BugDraft, BugPatch, BugPriority, BugStatus};
use crate::validation::{validate_bug, validate_patch};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BUGS_PATH: &str = "/api/bugs";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BugWire {
    id: Uuid,
    title: String,
    description: String,
    status: BugStatus,
    priority: BugPriority,
    created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<BugWire> for Bug {
    fn from(w: BugWire) -> Self {
        Self {
            id: w.id,
            title: w.title,
            description: w.description,
            status: w.status,
            priority: w.priority,
            created_by: w.created_by,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldsWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,
}

impl From<BugDraft> for FieldsWire {
    fn from(d: BugDraft) -> Self {
        Self {
            title: d.title,
            description: d.description,
            status: d.status,
            priority: d.priority,
            created_by: d.created_by,
        }
    }
}

impl From<BugPatch> for FieldsWire {
    fn from(p: BugPatch) -> Self {
        Self {
            title: p.title,
            description: p.description,
            status: p.status,
            priority: p.priority,
            created_by: p.created_by,
        }
    }
}

/// HTTP implementation of [`BugsClientV1`].
#[derive(Debug, Clone)]
pub struct HttpBugsClient {
    http: Client,
    base_url: String,
}

impl HttpBugsClient {
    /// Build a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BugsError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!(?e, "HttpBugsClient: failed to create HTTP client");
                BugsError::server_error(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}{BUGS_PATH}", self.base_url)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}{BUGS_PATH}/{id}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<SuccessEnvelope<T>, BugsError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(?e, "HttpBugsClient: request failed");
            BugsError::server_error(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<SuccessEnvelope<T>>().await.map_err(|e| {
                tracing::error!(?e, "HttpBugsClient: malformed success envelope");
                BugsError::server_error(format!("Malformed response: {e}"))
            });
        }

        let kind = ErrorKind::from_status(status.as_u16());
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Server Error")
                .to_owned(),
        };
        tracing::debug!(status = status.as_u16(), %message, "HttpBugsClient: request rejected");
        Err(BugsError::from_kind(kind, message))
    }
}

#[async_trait]
impl BugsClientV1 for HttpBugsClient {
    async fn list_bugs(&self) -> Result<Vec<Bug>, BugsError> {
        let envelope: SuccessEnvelope<Vec<BugWire>> =
            self.send(self.http.get(self.collection_url())).await?;
        Ok(envelope.data.into_iter().map(Into::into).collect())
    }

    async fn get_bug(&self, id: Uuid) -> Result<Bug, BugsError> {
        let envelope: SuccessEnvelope<BugWire> = self.send(self.http.get(self.item_url(id))).await?;
        Ok(envelope.data.into())
    }

    async fn create_bug(&self, draft: BugDraft) -> Result<Bug, BugsError> {
        let draft = draft.normalized();
        let report = validate_bug(&draft);
        if !report.is_valid() {
            return Err(BugsError::validation(&report));
        }

        let body = FieldsWire::from(draft);
        let envelope: SuccessEnvelope<BugWire> = self
            .send(self.http.post(self.collection_url()).json(&body))
            .await?;
        Ok(envelope.data.into())
    }

    async fn update_bug(&self, id: Uuid, patch: BugPatch) -> Result<Bug, BugsError> {
        let report = validate_patch(&patch);
        if !report.is_valid() {
            return Err(BugsError::validation(&report));
        }

        let body = FieldsWire::from(patch);
        let envelope: SuccessEnvelope<BugWire> =
            self.send(self.http.put(self.item_url(id)).json(&body)).await?;
        Ok(envelope.data.into())
    }

    async fn delete_bug(&self, id: Uuid) -> Result<(), BugsError> {
        let _: SuccessEnvelope<serde_json::Value> =
            self.send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}
