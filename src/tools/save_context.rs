//! MCP `save_context` tool request and response shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `save_context` MCP tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveContextParams {
    /// The context text to summarize, embed, and persist.
    #[schemars(description = "The context text to summarize, embed, and persist")]
    pub context_text: String,
}

/// Response envelope for `save_context`.
#[derive(Debug, Serialize)]
pub struct SaveContextResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveContextResponse {
    pub fn success(id: String) -> Self {
        Self {
            status: "success",
            id: Some(id),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            id: None,
            error: Some(error.into()),
        }
    }
}
