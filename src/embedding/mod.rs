pub mod mock;

use crate::config::EmbedderConfig;
use crate::error::Result;

/// Trait for embedding text into vectors.
///
/// Implementations produce exactly [`dimensions`](Embedder::dimensions)
/// finite components for every input. All methods are synchronous; callers in
/// async contexts should use `tokio::task::spawn_blocking`.
pub trait Embedder: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Number of dimensions this embedder produces.
    fn dimensions(&self) -> usize;
}

/// Create an embedding provider from config.
///
/// Currently only `"mock"` is supported (deterministic digest-seeded
/// vectors). Real model-backed providers plug in behind the same trait.
pub fn create_embedder(config: &EmbedderConfig) -> anyhow::Result<Box<dyn Embedder>> {
    match config.provider.as_str() {
        "mock" => Ok(Box::new(mock::HashEmbedder::new(config.dimensions))),
        other => anyhow::bail!("unknown embedder provider: {other}. Supported: mock"),
    }
}
