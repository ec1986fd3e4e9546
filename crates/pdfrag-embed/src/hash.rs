//! Deterministic offline embedder.
//!
//! This module provides a [`HashEmbedder`] that derives vectors from a
//! blake3 hash of the input text. It's useful for:
//! - Running the full pipeline without network access or API keys
//! - Unit and integration tests that need stable, content-dependent vectors
//!
//! Identical texts always embed to identical vectors, and different texts
//! almost always embed to different ones, which is enough for the search
//! ordering properties the tests rely on. The vectors carry no semantic
//! meaning.

use async_trait::async_trait;
use pdfrag_core::{EmbedError, Embedder};

/// Deterministic embedder seeded by a blake3 hash of the text.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a new hash embedder with the default dimension (64).
    #[must_use]
    pub fn new() -> Self {
        Self { dimension: 64 }
    }

    /// Create a new hash embedder with a custom dimension.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    /// The dimension of produced vectors.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        let bytes = hash.as_bytes();
        (0..self.dimension)
            .map(|i| {
                let byte = bytes[i % bytes.len()];
                // Rotate by position so dimensions beyond 32 aren't copies
                let rotated = byte.wrapping_add((i / bytes.len()) as u8);
                (f32::from(rotated) / 255.0) - 0.5
            })
            .collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn model_name(&self) -> &str {
        "hash"
    }

    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}
