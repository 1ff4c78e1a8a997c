//! MCP `delete_context` tool request and response shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `delete_context` MCP tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteContextParams {
    /// Id of the context entry to delete.
    #[schemars(description = "Id of the context entry to delete")]
    pub id: String,
}

/// Response envelope for `delete_context`.
#[derive(Debug, Serialize)]
pub struct DeleteContextResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteContextResponse {
    pub fn success() -> Self {
        Self {
            status: "success",
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: Some(error.into()),
        }
    }
}
