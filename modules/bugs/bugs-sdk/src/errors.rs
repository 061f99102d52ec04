//! Public error taxonomy for the `bugs` module.
//!
//! Every failure surfaced to a caller is one of three kinds, each bound to a
//! fixed HTTP status code.

use thiserror::Error;

use crate::validation::ValidationReport;

/// The closed set of error kinds and their status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    ServerError,
}

impl ErrorKind {
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    /// Classify a status code; anything that is not 400 or 404 is a server error.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            _ => Self::ServerError,
        }
    }
}

/// Errors returned by every `BugsClientV1` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BugsError {
    /// Client-supplied data violates a rule.
    #[error("{message}")]
    BadRequest { message: String },

    /// The referenced identifier does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// Anything else, including storage and transport failures.
    #[error("{message}")]
    ServerError { message: String },
}

impl BugsError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::ServerError {
            message: message.into(),
        }
    }

    /// A bad request whose message is the serialized error map.
    #[must_use]
    pub fn validation(report: &ValidationReport) -> Self {
        Self::bad_request(report.to_json())
    }

    #[must_use]
    pub fn bug_not_found(id: impl std::fmt::Display) -> Self {
        Self::not_found(format!("Bug not found with id of {id}"))
    }

    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        match kind {
            ErrorKind::BadRequest => Self::bad_request(message),
            ErrorKind::NotFound => Self::not_found(message),
            ErrorKind::ServerError => Self::server_error(message),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ServerError { .. } => ErrorKind::ServerError,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::NotFound { message }
            | Self::ServerError { message } => message,
        }
    }

    /// Recover the field error map carried by a validation failure.
    #[must_use]
    pub fn validation_report(&self) -> Option<ValidationReport> {
        match self {
            Self::BadRequest { message } => serde_json::from_str(message).ok(),
            _ => None,
        }
    }
}
