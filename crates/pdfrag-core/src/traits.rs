//! Core traits for pdfrag components.
//!
//! These are the seams between the pipeline and its external collaborators:
//!
//! - [`DocumentLoader`]: turn a file into page-level text
//! - [`Embedder`]: turn text into fixed-length vectors
//! - [`AnswerGenerator`]: turn an assembled prompt into an answer
//!
//! Each seam has a production implementation and a cheap deterministic one,
//! so the pipeline can be exercised without network access.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{EmbedError, GenerationError, LoadError};
use crate::types::PageRecord;

// ============================================================================
// Document Loading
// ============================================================================

/// Trait for loading documents into page records.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Short name of this loader, for logs.
    fn name(&self) -> &str;

    /// Check whether this loader handles the given file.
    fn can_load(&self, path: &Path) -> bool;

    /// Load a file into an ordered sequence of page records.
    async fn load(&self, path: &Path) -> Result<Vec<PageRecord>, LoadError>;
}

// ============================================================================
// Embedding
// ============================================================================

/// Trait for generating embeddings.
///
/// The same embedder (or at least the same model) must be used at ingest and
/// query time; the index manifest records the model name, but the pairing is
/// a caller responsibility and is not validated.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model name/identifier, recorded in the index manifest.
    fn model_name(&self) -> &str;

    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Embed a single query string.
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vectors = self.embed_texts(&[query]).await?;
        if vectors.is_empty() {
            return Err(EmbedError::Empty);
        }
        Ok(vectors.swap_remove(0))
    }
}

// ============================================================================
// Answer Synthesis
// ============================================================================

/// Trait for generating an answer from an assembled prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Model name/identifier, for logs.
    fn model_name(&self) -> &str;

    /// Produce an answer for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
