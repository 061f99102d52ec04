use bugs_sdk::{Bug, BugPriority, BugStatus};
use sea_orm::Set;

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{ActiveModel as BugAM, Model as BugEntity};

/// Convert a database entity to a contract model.
///
/// Stored enum values outside the known sets mean the table was written by
/// something other than this module and are reported as database errors.
impl TryFrom<BugEntity> for Bug {
    type Error = DomainError;

    fn try_from(e: BugEntity) -> Result<Self, Self::Error> {
        let status = e
            .status
            .parse::<BugStatus>()
            .map_err(|err| DomainError::database(format!("bug {}: {err}", e.id)))?;
        let priority = e
            .priority
            .parse::<BugPriority>()
            .map_err(|err| DomainError::database(format!("bug {}: {err}", e.id)))?;

        Ok(Self {
            id: e.id,
            title: e.title,
            description: e.description,
            status,
            priority,
            created_by: e.created_by,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

/// Active model with every column set, used for both insert and update.
impl From<&Bug> for BugAM {
    fn from(bug: &Bug) -> Self {
        Self {
            id: Set(bug.id),
            title: Set(bug.title.clone()),
            description: Set(bug.description.clone()),
            status: Set(bug.status.as_str().to_owned()),
            priority: Set(bug.priority.as_str().to_owned()),
            created_by: Set(bug.created_by.clone()),
            created_at: Set(bug.created_at),
            updated_at: Set(bug.updated_at),
        }
    }
}
