//! Domain service - business rules for bug records.
//!
//! Every write goes through the validation gate from `bugs_sdk::validation`
//! before reaching the repository. Updates merge the patch onto the stored
//! record, validate the merged candidate, and persist the merged record.

use std::sync::Arc;

use bugs_sdk::{Bug, BugDraft, BugPatch, NewBug};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repo::BugsRepository;

/// Current time at the precision every supported backend stores.
fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_microsecond(now.microsecond()).unwrap_or(now)
}

fn validated(draft: BugDraft) -> Result<NewBug, DomainError> {
    draft.normalized().into_new_bug().map_err(|report| {
        debug!(fields = ?report.fields(), "Bug rejected by validation");
        DomainError::validation(report)
    })
}

pub struct Service {
    repo: Arc<dyn BugsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn BugsRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns `DomainError::Database` if the repository fails.
    pub async fn list_bugs(&self) -> Result<Vec<Bug>, DomainError> {
        debug!("Listing bugs");
        let bugs = self.repo.find_all().await?;
        debug!("Successfully listed {} bugs", bugs.len());
        Ok(bugs)
    }

    /// # Errors
    /// Returns `DomainError::NotFound` if no bug has this id.
    pub async fn get_bug(&self, id: Uuid) -> Result<Bug, DomainError> {
        debug!(bug_id = %id, "Getting bug by id");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// # Errors
    /// Returns `DomainError::Validation` with every violated field when the
    /// draft fails the validation gate.
    pub async fn create_bug(&self, draft: BugDraft) -> Result<Bug, DomainError> {
        info!("Creating new bug");

        let NewBug {
            title,
            description,
            status,
            priority,
            created_by,
        } = validated(draft)?;

        let now = now_utc();
        let bug = Bug {
            id: Uuid::now_v7(),
            title,
            description,
            status,
            priority,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let bug = self.repo.create(bug).await?;
        info!("Successfully created bug with id={}", bug.id);
        Ok(bug)
    }

    /// # Errors
    /// Returns `DomainError::NotFound` if the bug does not exist and
    /// `DomainError::Validation` if the merged record fails the gate.
    pub async fn update_bug(&self, id: Uuid, patch: BugPatch) -> Result<Bug, DomainError> {
        info!(bug_id = %id, "Updating bug");

        let current = self.get_bug(id).await?;
        if patch.is_empty() {
            debug!("Empty patch, returning stored bug unchanged");
            return Ok(current);
        }

        let merged = validated(BugDraft::from(&current).merged_with(patch))?;
        let bug = Bug {
            title: merged.title,
            description: merged.description,
            status: merged.status,
            priority: merged.priority,
            created_by: merged.created_by,
            updated_at: now_utc(),
            ..current
        };

        let bug = self.repo.update(bug).await?;
        info!("Successfully updated bug");
        Ok(bug)
    }

    /// # Errors
    /// Returns `DomainError::NotFound` if the bug does not exist.
    pub async fn delete_bug(&self, id: Uuid) -> Result<(), DomainError> {
        info!(bug_id = %id, "Deleting bug");

        if self.repo.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found(id));
        }
        if !self.repo.delete_by_id(id).await? {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted bug");
        Ok(())
    }
}
