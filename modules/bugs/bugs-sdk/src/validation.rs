//! Validation gate for bug records.
//!
//! This is the single rule set used by the server before anything is stored
//! and by clients before a request is sent. Every rule is evaluated; the
//! report collects all violations instead of stopping at the first one.
//!
//! Length limits count Unicode scalar values (`char`s), not UTF-16 code
//! units, so text outside the Basic Multilingual Plane counts once per char.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{BugDraft, BugPatch, BugPriority, BugStatus, NewBug};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Field names as they appear on the wire and in error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BugField {
    Title,
    Description,
    Status,
    Priority,
    CreatedBy,
}

impl BugField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::CreatedBy => "createdBy",
        }
    }
}

impl fmt::Display for BugField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running the gate: one message per violated field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<BugField, String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<BugField, String> {
        &self.errors
    }

    #[must_use]
    pub fn get(&self, field: BugField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: BugField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Field names that failed, in wire order.
    #[must_use]
    pub fn fields(&self) -> Vec<BugField> {
        self.errors.keys().copied().collect()
    }

    /// The error map as a JSON object string, e.g. `{"title":"Title is required"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A map of enum keys to strings always serializes.
        serde_json::to_string(&self.errors).unwrap_or_else(|_| String::from("{}"))
    }

    fn reject(&mut self, field: BugField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Run every rule against `candidate` and collect the violations.
#[must_use]
pub fn validate_bug(candidate: &BugDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    match present(candidate.title.as_ref()) {
        None => report.reject(BugField::Title, "Title is required"),
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => report.reject(
            BugField::Title,
            format!("Title cannot be more than {TITLE_MAX_CHARS} characters"),
        ),
        Some(_) => {}
    }

    match present(candidate.description.as_ref()) {
        None => report.reject(BugField::Description, "Description is required"),
        Some(description) if description.chars().count() > DESCRIPTION_MAX_CHARS => report
            .reject(
                BugField::Description,
                format!("Description cannot be more than {DESCRIPTION_MAX_CHARS} characters"),
            ),
        Some(_) => {}
    }

    if let Some(status) = present(candidate.status.as_ref()) {
        if status.parse::<BugStatus>().is_err() {
            report.reject(
                BugField::Status,
                "Status must be one of: open, in-progress, resolved",
            );
        }
    }

    if let Some(priority) = present(candidate.priority.as_ref()) {
        if priority.parse::<BugPriority>().is_err() {
            report.reject(
                BugField::Priority,
                "Priority must be one of: low, medium, high",
            );
        }
    }

    if present(candidate.created_by.as_ref()).is_none() {
        report.reject(BugField::CreatedBy, "Creator name is required");
    }

    report
}

/// Check only the fields a patch supplies.
///
/// Used by clients that do not hold the stored record; the server still
/// validates the merged result.
#[must_use]
pub fn validate_patch(patch: &BugPatch) -> ValidationReport {
    let supplied = [
        (BugField::Title, patch.title.is_some()),
        (BugField::Description, patch.description.is_some()),
        (BugField::Status, patch.status.is_some()),
        (BugField::Priority, patch.priority.is_some()),
        (BugField::CreatedBy, patch.created_by.is_some()),
    ];

    let mut report = validate_bug(&BugDraft {
        title: patch.title.clone(),
        description: patch.description.clone(),
        status: patch.status.clone(),
        priority: patch.priority.clone(),
        created_by: patch.created_by.clone(),
    });
    report
        .errors
        .retain(|field, _| supplied.iter().any(|(f, set)| f == field && *set));
    report
}

impl BugDraft {
    /// Validate and convert into typed values, applying the `open`/`medium`
    /// defaults for an absent status or priority.
    ///
    /// # Errors
    ///
    /// Returns the full [`ValidationReport`] when any rule is violated.
    pub fn into_new_bug(self) -> Result<NewBug, ValidationReport> {
        let report = validate_bug(&self);
        if !report.is_valid() {
            return Err(report);
        }

        let status = present(self.status.as_ref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let priority = present(self.priority.as_ref())
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();

        Ok(NewBug {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status,
            priority,
            created_by: self.created_by.unwrap_or_default(),
        })
    }
}
