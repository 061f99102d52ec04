//! Bugs Module
//!
//! Bug tracking with a REST API, `SeaORM` storage and an in-process client.
//!
//! ## Public API
//!
//! The public contract is defined in the `bugs-sdk` crate and re-exported here:
//! - `BugsClientV1` - trait for in-process and remote consumers
//! - `Bug`, `BugDraft`, `BugPatch`, `NewBug` - data models
//! - `BugsError` - error taxonomy
//!
//! The process entry point owns the database connection and hands it to
//! [`BugsModule`], which wires the service, the router and the local client.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use bugs_sdk::{
    Bug, BugDraft, BugPatch, BugPriority, BugStatus, BugsClientV1, BugsError, NewBug,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::BugsModule;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests; external consumers should stick to the SDK types.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::BugsConfig;
