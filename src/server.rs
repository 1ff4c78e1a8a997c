//! MCP server initialization for the stdio transport.
//!
//! [`serve_stdio`] wires the context store, summarizer, and embedding
//! provider into the MCP tool handler and runs it until the client
//! disconnects or the process is interrupted. Either way the store is closed
//! before returning.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::{Arc, Mutex};

use crate::config::MemoryConfig;
use crate::embedding;
use crate::store::ContextStore;
use crate::summarizer;
use crate::tools::ContextTools;

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: MemoryConfig) -> Result<()> {
    tracing::info!("starting Project-Memory MCP server on stdio");

    let db_path = config.resolved_db_path();
    let store = ContextStore::open(&db_path, config.embedder.dimensions)
        .context("failed to open context store")?;
    tracing::info!(
        db = %db_path.display(),
        dimensions = config.embedder.dimensions,
        "context store ready"
    );

    let store = Arc::new(Mutex::new(store));
    let summarizer: Arc<dyn summarizer::Summarizer> =
        Arc::from(summarizer::create_summarizer(&config.summarizer)?);
    let embedder: Arc<dyn embedding::Embedder> =
        Arc::from(embedding::create_embedder(&config.embedder)?);
    let config = Arc::new(config);

    let tools = ContextTools::new(Arc::clone(&store), summarizer, embedder, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    tokio::select! {
        result = server.waiting() => {
            result?;
            tracing::info!("client disconnected");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
        }
    }

    if let Ok(mut store) = store.lock() {
        if let Err(err) = store.close() {
            tracing::warn!(error = %err, "failed to close context store cleanly");
        }
    }
    tracing::info!("MCP server shut down");

    Ok(())
}
