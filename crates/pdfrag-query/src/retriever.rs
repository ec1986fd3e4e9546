//! Retrieval over a loaded index.

use pdfrag_core::{Embedder, Result, ScoredSegment, Segment};
use pdfrag_store::FlatIndex;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Retrieves the most similar segments for a query string.
///
/// The embedder must match the model used at ingest; the index manifest
/// records that model's name, but the pairing is not validated here.
pub struct Retriever {
    index: FlatIndex,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever").finish_non_exhaustive()
    }
}

impl Retriever {
    /// Create a retriever over an already-loaded index.
    pub fn new(index: FlatIndex, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }

    /// Load the index at `index_path` and wrap it in a retriever.
    pub fn open(index_path: &Path, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let index = FlatIndex::load(index_path)?;
        Ok(Self::new(index, embedder))
    }

    /// The underlying index.
    #[must_use]
    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    /// Retrieve the top-`k` segments with their scores.
    pub async fn retrieve_scored(
        &self,
        query_text: &str,
        k: usize,
    ) -> Result<Vec<ScoredSegment>> {
        debug!("Retrieving top-{} for query: {}", k, query_text);
        let vector = self.embedder.embed_query(query_text).await?;
        let results = self.index.query(&vector, k)?;
        debug!("Retrieved {} segments", results.len());
        Ok(results)
    }

    /// Retrieve the top-`k` segments, scores stripped, most similar first.
    pub async fn retrieve(&self, query_text: &str, k: usize) -> Result<Vec<Segment>> {
        let scored = self.retrieve_scored(query_text, k).await?;
        Ok(scored.into_iter().map(|s| s.segment).collect())
    }
}
