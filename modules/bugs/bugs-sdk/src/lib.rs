//! Bugs SDK
//!
//! This crate provides the public contract of the `bugs` module:
//! - `BugsClientV1` trait
//! - Model types for bug records (`Bug`, `NewBug`, `BugDraft`, `BugPatch`)
//! - The validation gate shared by the server and every client (`validation`)
//! - Error taxonomy (`BugsError`) and the JSON response envelope
//! - `HttpBugsClient` (behind the `http-client` feature)
//!
//! ## Usage
//!
//! ```ignore
//! use bugs_sdk::{BugDraft, BugsClientV1};
//!
//! let created = client.create_bug(draft).await?;
//! let all = client.list_bugs().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod envelope;
pub mod errors;
pub mod models;
pub mod validation;

#[cfg(feature = "http-client")]
pub mod http_client;

pub use client::BugsClientV1;
pub use envelope::{ErrorEnvelope, SuccessEnvelope};
pub use errors::{BugsError, ErrorKind};
pub use models::{Bug, BugDraft, BugPatch, BugPriority, BugStatus, NewBug, ParseEnumError};
pub use validation::{BugField, ValidationReport, validate_bug, validate_patch};

#[cfg(feature = "http-client")]
pub use http_client::HttpBugsClient;
