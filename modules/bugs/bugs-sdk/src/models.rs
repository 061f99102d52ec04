//! Public models for the `bugs` module.
//!
//! These are transport-agnostic data structures shared by the server and its
//! clients. Wire-level DTOs live in the server's REST layer; the only serde
//! derives here are on the enums, whose string forms are part of the contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Workflow state of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BugStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl BugStatus {
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Resolved];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

/// Urgency of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl BugPriority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Raised when a string is not a member of `BugStatus` or `BugPriority`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for BugStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_owned(),
            })
    }
}

impl FromStr for BugPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BugPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted bug record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub created_by: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Candidate bug record as submitted by a caller.
///
/// Every field is optional and `status`/`priority` are kept as raw strings so
/// that invalid input can be represented and reported by the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BugDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_by: Option<String>,
}

/// Partial update for a bug. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BugPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_by: Option<String>,
}

/// Validated, typed values for a bug ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub created_by: String,
}

impl BugPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.created_by.is_none()
    }
}

impl BugDraft {
    /// Trim the fields that are stored trimmed (`title`, `created_by`).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_owned());
        self.created_by = self.created_by.map(|c| c.trim().to_owned());
        self
    }

    /// Overlay a patch on this draft; fields present in the patch win.
    ///
    /// An empty `status` or `priority` counts as absent and keeps the value
    /// already in the draft.
    #[must_use]
    pub fn merged_with(self, patch: BugPatch) -> Self {
        Self {
            title: patch.title.or(self.title),
            description: patch.description.or(self.description),
            status: patch.status.filter(|s| !s.is_empty()).or(self.status),
            priority: patch.priority.filter(|p| !p.is_empty()).or(self.priority),
            created_by: patch.created_by.or(self.created_by),
        }
    }
}

impl From<&Bug> for BugDraft {
    fn from(bug: &Bug) -> Self {
        Self {
            title: Some(bug.title.clone()),
            description: Some(bug.description.clone()),
            status: Some(bug.status.as_str().to_owned()),
            priority: Some(bug.priority.as_str().to_owned()),
            created_by: Some(bug.created_by.clone()),
        }
    }
}

impl From<NewBug> for BugDraft {
    fn from(bug: NewBug) -> Self {
        Self {
            title: Some(bug.title),
            description: Some(bug.description),
            status: Some(bug.status.as_str().to_owned()),
            priority: Some(bug.priority.as_str().to_owned()),
            created_by: Some(bug.created_by),
        }
    }
}
