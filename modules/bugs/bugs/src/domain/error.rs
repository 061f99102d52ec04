use bugs_sdk::{BugsError, ValidationReport};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bug not found: {id}")]
    NotFound { id: String },

    #[error("Validation failed: {report}")]
    Validation { report: ValidationReport },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    #[must_use]
    pub fn validation(report: ValidationReport) -> Self {
        Self::Validation { report }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for BugsError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { id } => BugsError::bug_not_found(id),
            DomainError::Validation { report } => BugsError::validation(&report),
            DomainError::Database { .. } => {
                BugsError::server_error("An internal database error occurred")
            }
        }
    }
}
