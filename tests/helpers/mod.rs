#![allow(dead_code)]

use projectmemory::config::MemoryConfig;
use projectmemory::embedding::mock::HashEmbedder;
use projectmemory::store::ContextStore;
use projectmemory::summarizer::basic::BasicSummarizer;
use projectmemory::tools::ContextTools;
use projectmemory::vector::encode_vector;
use std::sync::{Arc, Mutex};

pub const TEST_DIMENSIONS: usize = 4;

/// Config matching the test fixtures: 4 dimensions, 200-byte summaries.
pub fn test_config() -> MemoryConfig {
    let mut config = MemoryConfig::default();
    config.embedder.dimensions = TEST_DIMENSIONS;
    config.summarizer.max_summary_length = 200;
    config
}

/// Dispatcher wired to an in-memory store, the deterministic mock embedder,
/// and the basic summarizer.
pub fn test_tools() -> ContextTools {
    test_tools_with(test_config())
}

pub fn test_tools_with(config: MemoryConfig) -> ContextTools {
    let store = ContextStore::open_in_memory(config.embedder.dimensions).unwrap();
    ContextTools::new(
        Arc::new(Mutex::new(store)),
        Arc::new(BasicSummarizer::new(config.summarizer.max_summary_length)),
        Arc::new(HashEmbedder::new(config.embedder.dimensions)),
        Arc::new(config),
    )
}

/// Fresh in-memory store with the test dimension.
pub fn test_store() -> ContextStore {
    ContextStore::open_in_memory(TEST_DIMENSIONS).unwrap()
}

/// Unit vector along `axis`.
pub fn axis_vector(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; TEST_DIMENSIONS];
    v[axis % TEST_DIMENSIONS] = 1.0;
    v
}

/// Encoded unit vector along `axis`.
pub fn axis_blob(axis: usize) -> Vec<u8> {
    encode_vector(&axis_vector(axis))
}
