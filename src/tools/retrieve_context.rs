//! MCP `retrieve_context` tool request and response shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `retrieve_context` MCP tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RetrieveContextParams {
    /// The query text to search for.
    #[schemars(description = "The query text to search for")]
    pub query: String,

    /// Maximum number of results. Omitted or non-positive values fall back
    /// to the configured default.
    #[schemars(
        description = "Maximum number of results to return. Omitted or non-positive values use the server default."
    )]
    pub limit: Option<i64>,
}

/// Response envelope for `retrieve_context`.
///
/// `results` is always present so the envelope shape stays stable, including
/// on errors.
#[derive(Debug, Serialize)]
pub struct RetrieveContextResponse {
    pub status: &'static str,
    pub results: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RetrieveContextResponse {
    pub fn success(results: Vec<String>) -> Self {
        Self {
            status: "success",
            results,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}
