//! Error responder for the bugs REST API.
//!
//! Handlers return [`ApiError`]. Its `IntoResponse` logs the failure and
//! renders the public envelope; the full report rides along as a response
//! extension so [`respond_errors`] can add the `stack` field when the server
//! runs in development.

use std::any::Any;
use std::fmt::Write as _;
use std::time::Duration;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use bugs_sdk::{BugsError, ErrorEnvelope, ErrorKind};

use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    stack: String,
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::BadRequest => "BadRequest",
        ErrorKind::NotFound => "NotFound",
        ErrorKind::ServerError => "ServerError",
    }
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let stack = format!("{}: {message}", kind_name(kind));
        Self {
            kind,
            message,
            stack,
        }
    }

    /// Append a cause line to the diagnostic stack. Never shown in production.
    #[must_use]
    pub fn caused_by(mut self, cause: impl std::fmt::Display) -> Self {
        let _ = write!(self.stack, "\n    caused by: {cause}");
        self
    }

    fn caused_by_chain(mut self, err: &dyn std::error::Error) -> Self {
        let mut source = Some(err);
        while let Some(e) = source {
            self = self.caused_by(e);
            source = e.source();
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn stack(&self) -> &str {
        &self.stack
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<BugsError> for ApiError {
    fn from(e: BugsError) -> Self {
        Self::new(e.kind(), e.message())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let detail = e.to_string();
        Self::from(BugsError::from(e)).caused_by(detail)
    }
}

/// Unparseable or non-JSON bodies are the caller's fault.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::BadRequest, rejection.body_text()).caused_by_chain(&rejection)
    }
}

/// Full error report attached to error responses.
#[derive(Debug, Clone)]
struct ErrorReport {
    message: String,
    stack: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), stack = %self.stack, "{}", self.message);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self.message);
        }

        let mut response = (status, Json(ErrorEnvelope::new(self.message.clone()))).into_response();
        response.extensions_mut().insert(ErrorReport {
            message: self.message,
            stack: self.stack,
        });
        response
    }
}

/// Decides whether error responses carry the diagnostic stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder {
    pub expose_stack: bool,
}

/// Outermost middleware: strips the internal report from every error
/// response and, in development, re-renders the body with `stack`.
pub async fn respond_errors(
    State(responder): State<Responder>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };
    if !responder.expose_stack {
        return response;
    }

    let status = response.status();
    (
        status,
        Json(ErrorEnvelope::new(report.message).with_stack(report.stack)),
    )
        .into_response()
}

/// Fails requests that outlive `limit` with a `ServerError` envelope.
pub async fn enforce_timeout(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::new(ErrorKind::ServerError, "Request timed out")
            .caused_by(format_args!("no response within {}ms", limit.as_millis()))
            .into_response(),
    }
}

/// Handler panics become a `ServerError` envelope instead of a dropped connection.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    ApiError::new(ErrorKind::ServerError, "Server Error")
        .caused_by(format_args!("panic: {detail}"))
        .into_response()
}

/// Fallback for paths no route matches.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::new(ErrorKind::NotFound, format!("Route not found: {}", uri.path()))
}
