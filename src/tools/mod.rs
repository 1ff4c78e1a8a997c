//! MCP tool dispatcher.
//!
//! [`ContextTools`] holds the store, summarizer, and embedder for the
//! lifetime of the process and exposes the five context tools via the
//! `#[tool_router]` macro. Each request is a straight-line pipeline with
//! early exit on the first failure; every response is a `{status, ...}`
//! envelope, so clients always receive well-formed JSON even on errors.

pub mod clear_all_context;
pub mod delete_context;
pub mod replace_context;
pub mod retrieve_context;
pub mod save_context;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::config::MemoryConfig;
use crate::embedding::Embedder;
use crate::error::{MemoryError, Result as MemResult};
use crate::hash::{self, IdClock};
use crate::store::ContextStore;
use crate::summarizer::Summarizer;
use crate::vector;

use clear_all_context::{ClearAllContextParams, ClearAllContextResponse};
use delete_context::{DeleteContextParams, DeleteContextResponse};
use replace_context::{ReplaceContextParams, ReplaceContextResponse};
use retrieve_context::{RetrieveContextParams, RetrieveContextResponse};
use save_context::{SaveContextParams, SaveContextResponse};

/// Confirmation literal required by `clear_all_context`. Case-sensitive,
/// no whitespace trimming.
const CLEAR_CONFIRMATION: &str = "confirm";

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// The MCP tool handler. Holds shared state (context store, summarizer,
/// embedding provider, config) and exposes the five context tools.
#[derive(Clone)]
pub struct ContextTools {
    tool_router: ToolRouter<Self>,
    store: Arc<Mutex<ContextStore>>,
    summarizer: Arc<dyn Summarizer>,
    embedder: Arc<dyn Embedder>,
    config: Arc<MemoryConfig>,
    clock: Arc<IdClock>,
}

#[tool_router]
impl ContextTools {
    pub fn new(
        store: Arc<Mutex<ContextStore>>,
        summarizer: Arc<dyn Summarizer>,
        embedder: Arc<dyn Embedder>,
        config: Arc<MemoryConfig>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            summarizer,
            embedder,
            config,
            clock: Arc::new(IdClock::new()),
        }
    }

    /// Save pipeline: summarize → embed → encode → derive id → put.
    pub async fn save(&self, params: SaveContextParams) -> SaveContextResponse {
        tracing::info!(text_len = params.context_text.len(), "save_context called");
        match self.save_inner(params.context_text).await {
            Ok(id) => {
                tracing::info!(id = %id, "context saved");
                SaveContextResponse::success(id)
            }
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "save_context failed");
                SaveContextResponse::failure(err.to_string())
            }
        }
    }

    async fn save_inner(&self, context_text: String) -> MemResult<String> {
        let summary = self.summarize(context_text).await?;
        let embedding = self.embed(summary.clone()).await?;
        let blob = vector::encode_vector(&embedding);

        let nanos = self.clock.next_nanos();
        let id = hash::context_id(&summary, nanos);
        let timestamp = nanos / NANOS_PER_SEC;

        let store = Arc::clone(&self.store);
        let row_id = id.clone();
        tokio::task::spawn_blocking(move || {
            let store = lock_store(&store)?;
            store.put(&row_id, &summary, &blob, timestamp)
        })
        .await
        .map_err(join_err)??;

        Ok(id)
    }

    /// Retrieve pipeline: embed the query, then scan and rank the store.
    pub async fn retrieve(&self, params: RetrieveContextParams) -> RetrieveContextResponse {
        let limit = params
            .limit
            .filter(|l| *l > 0)
            .map(|l| l as usize)
            .unwrap_or(self.config.retrieve.default_limit);
        tracing::info!(query_len = params.query.len(), limit, "retrieve_context called");

        match self.retrieve_inner(params.query, limit).await {
            Ok(results) => {
                tracing::info!(count = results.len(), "context retrieved");
                RetrieveContextResponse::success(results)
            }
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "retrieve_context failed");
                RetrieveContextResponse::failure(err.to_string())
            }
        }
    }

    async fn retrieve_inner(&self, query: String, limit: usize) -> MemResult<Vec<String>> {
        let embedding = self.embed(query).await?;

        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let store = lock_store(&store)?;
            store.search(&embedding, limit)
        })
        .await
        .map_err(join_err)?
    }

    /// Delete pipeline: a single idempotent row removal.
    pub async fn delete(&self, params: DeleteContextParams) -> DeleteContextResponse {
        tracing::info!(id = %params.id, "delete_context called");
        match self.delete_inner(params.id).await {
            Ok(()) => DeleteContextResponse::success(),
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "delete_context failed");
                DeleteContextResponse::failure(err.to_string())
            }
        }
    }

    async fn delete_inner(&self, id: String) -> MemResult<()> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let store = lock_store(&store)?;
            store.delete(&id)
        })
        .await
        .map_err(join_err)?
    }

    /// Clear pipeline: confirmation gate, then bulk removal.
    pub async fn clear_all(&self, params: ClearAllContextParams) -> ClearAllContextResponse {
        tracing::info!("clear_all_context called");
        match self.clear_all_inner(params.confirmation).await {
            Ok((deleted_count, remaining)) => {
                tracing::info!(deleted_count, remaining, "context store cleared");
                ClearAllContextResponse::success(deleted_count)
            }
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "clear_all_context failed");
                ClearAllContextResponse::failure(err.to_string())
            }
        }
    }

    async fn clear_all_inner(&self, confirmation: String) -> MemResult<(u64, u64)> {
        if confirmation != CLEAR_CONFIRMATION {
            return Err(MemoryError::Validation(format!(
                "confirmation must be the exact string \"{CLEAR_CONFIRMATION}\" to clear all context"
            )));
        }

        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let store = lock_store(&store)?;
            let deleted = store.clear()?;
            let remaining = store.count()?;
            Ok((deleted, remaining))
        })
        .await
        .map_err(join_err)?
    }

    /// Replace pipeline: validate the id, then run the save pipeline against
    /// the existing id.
    pub async fn replace(&self, params: ReplaceContextParams) -> ReplaceContextResponse {
        tracing::info!(
            id = %params.id,
            text_len = params.context_text.len(),
            "replace_context called"
        );
        match self.replace_inner(params.id, params.context_text).await {
            Ok(()) => ReplaceContextResponse::success(),
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "replace_context failed");
                ReplaceContextResponse::failure(err.to_string())
            }
        }
    }

    async fn replace_inner(&self, id: String, context_text: String) -> MemResult<()> {
        if id.is_empty() {
            return Err(MemoryError::Validation("id must not be empty".into()));
        }

        let summary = self.summarize(context_text).await?;
        let embedding = self.embed(summary.clone()).await?;
        let blob = vector::encode_vector(&embedding);
        let timestamp = self.clock.next_nanos() / NANOS_PER_SEC;

        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let store = lock_store(&store)?;
            store.replace(&id, &summary, &blob, timestamp)
        })
        .await
        .map_err(join_err)?
    }

    async fn summarize(&self, text: String) -> MemResult<String> {
        let summarizer = Arc::clone(&self.summarizer);
        tokio::task::spawn_blocking(move || summarizer.summarize(&text))
            .await
            .map_err(join_err)?
    }

    async fn embed(&self, text: String) -> MemResult<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        tokio::task::spawn_blocking(move || embedder.embed(&text))
            .await
            .map_err(join_err)?
    }

    /// Save context to the persistent memory store.
    #[tool(description = "Save context to the persistent memory store. The text is summarized, embedded, and stored under a derived id.")]
    async fn save_context(
        &self,
        Parameters(params): Parameters<SaveContextParams>,
    ) -> std::result::Result<String, String> {
        to_json(self.save(params).await)
    }

    /// Retrieve relevant context based on a query.
    #[tool(description = "Retrieve stored context relevant to a query, ranked by semantic similarity.")]
    async fn retrieve_context(
        &self,
        Parameters(params): Parameters<RetrieveContextParams>,
    ) -> std::result::Result<String, String> {
        to_json(self.retrieve(params).await)
    }

    /// Delete a context entry by id.
    #[tool(description = "Delete a context entry by id. Succeeds even if the id does not exist.")]
    async fn delete_context(
        &self,
        Parameters(params): Parameters<DeleteContextParams>,
    ) -> std::result::Result<String, String> {
        to_json(self.delete(params).await)
    }

    /// Delete every context entry. Requires confirmation.
    #[tool(description = "Delete ALL context entries. Requires confirmation='confirm' as a safety gate.")]
    async fn clear_all_context(
        &self,
        Parameters(params): Parameters<ClearAllContextParams>,
    ) -> std::result::Result<String, String> {
        to_json(self.clear_all(params).await)
    }

    /// Overwrite an existing context entry in place.
    #[tool(description = "Replace the context stored under an existing id with new text.")]
    async fn replace_context(
        &self,
        Parameters(params): Parameters<ReplaceContextParams>,
    ) -> std::result::Result<String, String> {
        to_json(self.replace(params).await)
    }
}

#[tool_handler]
impl ServerHandler for ContextTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Project-Memory is a persistent context store. Use save_context to deposit \
                 snippets, retrieve_context to find related ones, replace_context to overwrite \
                 an entry, and delete_context/clear_all_context to remove entries."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

fn lock_store(store: &Mutex<ContextStore>) -> MemResult<std::sync::MutexGuard<'_, ContextStore>> {
    store
        .lock()
        .map_err(|e| MemoryError::Internal(format!("store lock poisoned: {e}")))
}

fn join_err(e: tokio::task::JoinError) -> MemoryError {
    if e.is_cancelled() {
        MemoryError::Canceled
    } else {
        MemoryError::Internal(format!("background task failed: {e}"))
    }
}

fn to_json<T: Serialize>(response: T) -> std::result::Result<String, String> {
    serde_json::to_string(&response).map_err(|e| format!("serialization failed: {e}"))
}
