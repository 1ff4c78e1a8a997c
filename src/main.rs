use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use projectmemory::config::{self, MemoryConfig};
use projectmemory::server;

#[derive(Parser)]
#[command(
    name = "projectmemory",
    version,
    about = "Persistent per-project context memory for AI agents over MCP"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(value_name = "CONFIG", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MemoryConfig::load_from(&cli.config)?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.server.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    server::serve_stdio(config).await
}
