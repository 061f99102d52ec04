//! `BugsClientV1` trait definition.
//!
//! Implemented in-process by the `bugs` module (`BugsLocalClient`) and over
//! HTTP by [`crate::HttpBugsClient`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::BugsError;
use crate::models::{Bug, BugDraft, BugPatch};

#[async_trait]
pub trait BugsClientV1: Send + Sync {
    /// All bugs, newest first.
    async fn list_bugs(&self) -> Result<Vec<Bug>, BugsError>;

    /// Get a bug by ID.
    async fn get_bug(&self, id: Uuid) -> Result<Bug, BugsError>;

    /// Create a new bug from a candidate record.
    async fn create_bug(&self, draft: BugDraft) -> Result<Bug, BugsError>;

    /// Merge a partial update onto an existing bug.
    async fn update_bug(&self, id: Uuid, patch: BugPatch) -> Result<Bug, BugsError>;

    /// Delete a bug by ID.
    async fn delete_bug(&self, id: Uuid) -> Result<(), BugsError>;
}
