//! The ingest pipeline.

use pdfrag_chunker::SeparatorChunker;
use pdfrag_core::{
    DistanceMetric, EmbedError, Embedder, Error, IndexError, IndexStats, Result, VectorRecord,
};
use pdfrag_extract::LoaderRegistry;
use pdfrag_store::FlatIndex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for the ingest pipeline.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Separator the chunker splits on
    pub separator: String,
    /// Number of segments per embedding request
    pub batch_size: usize,
    /// Similarity metric fixed into the built index
    pub metric: DistanceMetric,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            batch_size: 32,
            metric: DistanceMetric::Cosine,
        }
    }
}

/// Runs the ingest pipeline: load → chunk → embed → build → save.
pub struct Ingestor {
    loaders: Arc<LoaderRegistry>,
    embedder: Arc<dyn Embedder>,
    config: IngestConfig,
}

impl Ingestor {
    /// Create a new ingestor.
    pub fn new(
        loaders: Arc<LoaderRegistry>,
        embedder: Arc<dyn Embedder>,
        config: IngestConfig,
    ) -> Self {
        Self {
            loaders,
            embedder,
            config,
        }
    }

    /// Ingest `file_path` into a persisted index at `index_path`.
    ///
    /// Re-running replaces the prior artifact; a failure at any stage before
    /// the save completes leaves the prior artifact untouched.
    pub async fn ingest(&self, file_path: &Path, index_path: &Path) -> Result<IndexStats> {
        info!("Ingesting {:?}", file_path);

        let pages = self.loaders.load(file_path).await?;
        debug!("Loaded {} pages", pages.len());

        let chunker = SeparatorChunker::new(self.config.separator.clone());
        let segments = chunker.split(&pages);
        if segments.is_empty() {
            return Err(IndexError::EmptyInput.into());
        }
        debug!("Split into {} segments", segments.len());

        let vectors = self.embed_segments(&segments).await?;

        let records: Vec<VectorRecord> = segments
            .into_iter()
            .zip(vectors)
            .map(|(segment, vector)| VectorRecord { vector, segment })
            .collect();

        let index = FlatIndex::build(records, self.config.metric, self.embedder.model_name())?;
        index.save(index_path)?;

        let stats = index.stats();
        info!(
            "Ingest complete: {} segments, dimension {}, saved to {:?}",
            stats.segment_count, stats.dimension, index_path
        );
        Ok(stats)
    }

    /// Embed segment texts in batches, one vector per segment, in order.
    async fn embed_segments(
        &self,
        segments: &[pdfrag_core::Segment],
    ) -> Result<Vec<Vec<f32>>> {
        let batch_size = self.config.batch_size.max(1);
        let mut vectors = Vec::with_capacity(segments.len());

        for batch in segments.chunks(batch_size) {
            let texts: Vec<&str> = batch.iter().map(|s| s.text.as_str()).collect();
            let mut batch_vectors = self.embedder.embed_texts(&texts).await?;
            if batch_vectors.len() != texts.len() {
                return Err(Error::Embed(EmbedError::CountMismatch {
                    expected: texts.len(),
                    got: batch_vectors.len(),
                }));
            }
            vectors.append(&mut batch_vectors);
        }

        Ok(vectors)
    }
}
