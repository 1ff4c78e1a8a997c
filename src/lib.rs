//! Persistent per-project context memory for AI agents, served over MCP.
//!
//! Project-Memory is an [MCP](https://modelcontextprotocol.io/) server that
//! gives agents a durable external memory: clients deposit text snippets,
//! the server condenses each into a bounded summary, embeds it as a dense
//! float32 vector, and stores both in a single-file SQLite database. Later
//! queries are embedded the same way and matched against every stored entry
//! by cosine similarity.
//!
//! # Architecture
//!
//! - **Storage**: SQLite, one `context_memory` table; embeddings persisted as
//!   little-endian length-prefixed blobs ([`vector`])
//! - **Search**: full scan plus in-memory cosine ranking, most recent first
//!   on ties ([`store`])
//! - **Capabilities**: [`summarizer`] and [`embedding`] are trait-based so
//!   providers can be swapped without touching the dispatch layer
//! - **Transport**: MCP over stdio via `rmcp` ([`server`], [`tools`])
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`error`] — The unified error taxonomy
//! - [`hash`] — Time-dependent context id derivation
//! - [`vector`] — Binary vector codec and cosine similarity
//! - [`summarizer`] — Text condensation capability
//! - [`embedding`] — Text embedding capability
//! - [`store`] — The durable context store engine
//! - [`tools`] — The five-tool MCP dispatcher

pub mod config;
pub mod embedding;
pub mod error;
pub mod hash;
pub mod server;
pub mod store;
pub mod summarizer;
pub mod tools;
pub mod vector;
