//! MCP `replace_context` tool request and response shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `replace_context` MCP tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReplaceContextParams {
    /// Id of the context entry to overwrite.
    #[schemars(description = "Id of the context entry to overwrite")]
    pub id: String,

    /// Replacement context text; summarized and embedded like a fresh save.
    #[schemars(description = "Replacement context text; summarized and embedded like a fresh save")]
    pub context_text: String,
}

/// Response envelope for `replace_context`.
#[derive(Debug, Serialize)]
pub struct ReplaceContextResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplaceContextResponse {
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
