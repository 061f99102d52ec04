//! REST layer: DTOs, handlers, routes and the error responder.
//!
//! Handlers translate between wire DTOs and SDK models and delegate to
//! `domain::service::Service`. Every failure leaves a handler as an
//! [`error::ApiError`] and is rendered by the responder into the shared
//! `{success, message, stack?}` envelope.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
