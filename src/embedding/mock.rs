//! Deterministic digest-seeded embedding provider.
//!
//! Each component is derived from a SHA-256 digest of the input text, so
//! identical inputs always embed to identical vectors. Output is
//! L2-normalized and never zero.

use sha2::{Digest, Sha256};

use crate::embedding::Embedder;
use crate::error::Result;

pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let digest = Sha256::digest(text.as_bytes());

        let mut embedding = Vec::with_capacity(self.dimensions);
        for i in 0..self.dimensions {
            // Four digest bytes per dimension, wrapping around the digest;
            // the index is folded in so the pattern does not repeat.
            let mut word = [0u8; 4];
            for (j, byte) in word.iter_mut().enumerate() {
                *byte = digest[(i * 4 + j) % digest.len()];
            }
            let seed = u32::from_le_bytes(word) ^ i as u32;
            embedding.push((seed % 1000) as f32 / 500.0 - 1.0);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for component in &mut embedding {
                *component /= norm;
            }
        } else {
            embedding[0] = 1.0;
        }

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
