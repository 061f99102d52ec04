use std::sync::Arc;

use async_trait::async_trait;
use bugs_sdk::{Bug, BugDraft, BugPatch, BugsClientV1, BugsError};
use uuid::Uuid;

use crate::domain::service::Service;

/// `BugsClientV1` backed directly by the domain service.
pub struct BugsLocalClient {
    service: Arc<Service>,
}

impl BugsLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BugsClientV1 for BugsLocalClient {
    async fn list_bugs(&self) -> Result<Vec<Bug>, BugsError> {
        self.service.list_bugs().await.map_err(Into::into)
    }

    async fn get_bug(&self, id: Uuid) -> Result<Bug, BugsError> {
        self.service.get_bug(id).await.map_err(Into::into)
    }

    async fn create_bug(&self, draft: BugDraft) -> Result<Bug, BugsError> {
        self.service.create_bug(draft).await.map_err(Into::into)
    }

    async fn update_bug(&self, id: Uuid, patch: BugPatch) -> Result<Bug, BugsError> {
        self.service.update_bug(id, patch).await.map_err(Into::into)
    }

    async fn delete_bug(&self, id: Uuid) -> Result<(), BugsError> {
        self.service.delete_bug(id).await.map_err(Into::into)
    }
}
