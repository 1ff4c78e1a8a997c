use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".projectmemory.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemoryConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub summarizer: SummarizerConfig,
    pub embedder: EmbedderConfig,
    pub retrieve: RetrieveConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
    pub log_format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SummarizerConfig {
    pub provider: String,
    pub max_summary_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbedderConfig {
    pub provider: String,
    pub dimensions: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrieveConfig {
    pub default_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_format: "text".into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: ".projectmemory.db".into(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: "basic".into(),
            max_summary_length: 500,
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: "mock".into(),
            dimensions: 768,
        }
    }
}

impl Default for RetrieveConfig {
    fn default() -> Self {
        Self { default_limit: 5 }
    }
}

impl MemoryConfig {
    /// Load config from a TOML file, then apply env var overrides.
    ///
    /// A missing file is not an error: defaults apply. An unreadable or
    /// malformed file is.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemoryConfig::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PROJECTMEMORY_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("PROJECTMEMORY_DB_PATH") {
            self.store.path = val;
        }
        if let Ok(val) = std::env::var("PROJECTMEMORY_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("PROJECTMEMORY_LOG_FORMAT") {
            self.server.log_format = val;
        }
        if let Ok(val) = std::env::var("PROJECTMEMORY_DIMENSIONS") {
            self.embedder.dimensions = val
                .parse()
                .context("PROJECTMEMORY_DIMENSIONS must be an integer")?;
        }
        if let Ok(val) = std::env::var("PROJECTMEMORY_MAX_SUMMARY_LENGTH") {
            self.summarizer.max_summary_length = val
                .parse()
                .context("PROJECTMEMORY_MAX_SUMMARY_LENGTH must be an integer")?;
        }
        if let Ok(val) = std::env::var("PROJECTMEMORY_DEFAULT_LIMIT") {
            self.retrieve.default_limit = val
                .parse()
                .context("PROJECTMEMORY_DEFAULT_LIMIT must be an integer")?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.embedder.dimensions >= 1,
            "embedder.dimensions must be at least 1"
        );
        anyhow::ensure!(
            self.summarizer.max_summary_length >= 1,
            "summarizer.max_summary_length must be at least 1"
        );
        anyhow::ensure!(
            self.retrieve.default_limit >= 1,
            "retrieve.default_limit must be at least 1"
        );
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.store.path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
