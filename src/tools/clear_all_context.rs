//! MCP `clear_all_context` tool request and response shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `clear_all_context` MCP tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClearAllContextParams {
    /// Must be the exact literal `"confirm"` for the deletion to proceed.
    #[schemars(
        description = "Safety gate: must be the exact string 'confirm' for the deletion to proceed"
    )]
    pub confirmation: String,
}

/// Response envelope for `clear_all_context`.
#[derive(Debug, Serialize)]
pub struct ClearAllContextResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClearAllContextResponse {
    pub fn success(deleted_count: u64) -> Self {
        Self {
            status: "success",
            deleted_count: Some(deleted_count),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            deleted_count: None,
            error: Some(error.into()),
        }
    }
}
