use async_trait::async_trait;
use bugs_sdk::Bug;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for bug persistence.
///
/// Keeps the domain service independent of the storage engine. Every method
/// is a single-record (or single-query) operation; no method retries.
#[async_trait]
pub trait BugsRepository: Send + Sync {
    /// All bugs, newest first.
    async fn find_all(&self) -> Result<Vec<Bug>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bug>, DomainError>;

    async fn create(&self, bug: Bug) -> Result<Bug, DomainError>;

    /// Overwrite every mutable column of an existing bug.
    async fn update(&self, bug: Bug) -> Result<Bug, DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
}
