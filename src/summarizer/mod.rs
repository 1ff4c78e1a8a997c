pub mod basic;

use crate::config::SummarizerConfig;
use crate::error::Result;

/// Trait for condensing raw context text into a bounded summary.
///
/// Implementations produce a non-empty string no longer than the configured
/// maximum. All methods are synchronous; callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait Summarizer: Send + Sync {
    /// Summarize a text snippet.
    fn summarize(&self, text: &str) -> Result<String>;
}

/// Create a summarizer from config.
///
/// Currently only `"basic"` is supported (boundary-aware truncation). Remote
/// LLM providers are deliberately out of scope.
pub fn create_summarizer(config: &SummarizerConfig) -> anyhow::Result<Box<dyn Summarizer>> {
    match config.provider.as_str() {
        "basic" => Ok(Box::new(basic::BasicSummarizer::new(
            config.max_summary_length,
        ))),
        other => anyhow::bail!("unknown summarizer provider: {other}. Supported: basic"),
    }
}
