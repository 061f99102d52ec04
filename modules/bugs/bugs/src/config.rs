use serde::{Deserialize, Serialize};

/// Configuration for the `bugs` module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BugsConfig {
    /// Include the error cause chain as `stack` in error responses.
    /// Only meant for development.
    #[serde(default)]
    pub expose_error_stack: bool,
    /// Serve the OpenAPI document at `/api/openapi.json`.
    #[serde(default)]
    pub enable_docs: bool,
    /// Requests running longer than this fail with a `ServerError`. `0` disables the limit.
    #[serde(default)]
    pub request_timeout_secs: u64,
}
