//! Flat (brute-force) vector index.

use chrono::{DateTime, Utc};
use pdfrag_core::{DistanceMetric, IndexError, IndexStats, ScoredSegment, VectorRecord};
use tracing::debug;

/// A flat vector index over embedded segments.
///
/// Records are kept in insertion order; queries scan every record and
/// stable-sort by score, so ties break by insertion order. The metric is
/// fixed at build time and persisted with the index.
#[derive(Debug)]
pub struct FlatIndex {
    records: Vec<VectorRecord>,
    dimension: usize,
    metric: DistanceMetric,
    embedding_model: String,
    created_at: DateTime<Utc>,
}

impl FlatIndex {
    /// Build an index from vector records.
    ///
    /// Fails with [`IndexError::EmptyInput`] on an empty record set and
    /// [`IndexError::Dimension`] when vector lengths are not uniform.
    pub fn build(
        records: Vec<VectorRecord>,
        metric: DistanceMetric,
        embedding_model: impl Into<String>,
    ) -> Result<Self, IndexError> {
        let Some(first) = records.first() else {
            return Err(IndexError::EmptyInput);
        };
        let dimension = first.vector.len();

        for record in &records {
            if record.vector.len() != dimension {
                return Err(IndexError::Dimension {
                    expected: dimension,
                    got: record.vector.len(),
                });
            }
        }

        debug!(
            "Built flat index: {} records, dimension {}, metric {}",
            records.len(),
            dimension,
            metric
        );

        Ok(Self {
            records,
            dimension,
            metric,
            embedding_model: embedding_model.into(),
            created_at: Utc::now(),
        })
    }

    pub(crate) fn from_parts(
        records: Vec<VectorRecord>,
        dimension: usize,
        metric: DistanceMetric,
        embedding_model: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            records,
            dimension,
            metric,
            embedding_model,
            created_at,
        }
    }

    /// Return the `min(k, len)` most similar segments to the query vector,
    /// in descending score order.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredSegment>, IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::Dimension {
                expected: self.dimension,
                got: vector.len(),
            });
        }

        let mut scored: Vec<(f32, &VectorRecord)> = self
            .records
            .iter()
            .map(|record| (score(self.metric, vector, &record.vector), record))
            .collect();

        // Stable sort: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let k = k.min(self.records.len());
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, record)| ScoredSegment {
                segment: record.segment.clone(),
                score,
            })
            .collect())
    }

    /// Number of records in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index is empty. Never true for a built index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Similarity metric fixed at build time.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Name of the embedding model used at ingest.
    #[must_use]
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// When the index was built.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn records(&self) -> &[VectorRecord] {
        &self.records
    }

    /// Summary of the index.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            segment_count: self.records.len() as u64,
            dimension: self.dimension,
            metric: self.metric,
            embedding_model: self.embedding_model.clone(),
            created_at: self.created_at,
        }
    }
}

/// Score a candidate against the query; higher is always more similar.
///
/// L2 distances are negated so both metrics sort the same way.
fn score(metric: DistanceMetric, query: &[f32], candidate: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Cosine => cosine_similarity(query, candidate),
        DistanceMetric::L2 => -l2_distance(query, candidate),
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfrag_core::{Segment, SegmentMetadata};
    use std::path::PathBuf;
    use uuid::Uuid;

    fn record(text: &str, vector: Vec<f32>) -> VectorRecord {
        VectorRecord {
            vector,
            segment: Segment {
                id: Uuid::new_v4(),
                text: text.to_string(),
                metadata: SegmentMetadata {
                    source_path: PathBuf::from("/docs/paper.pdf"),
                    page_number: 1,
                },
            },
        }
    }

    #[test]
    fn test_build_empty_input() {
        let err = FlatIndex::build(vec![], DistanceMetric::Cosine, "hash").unwrap_err();
        assert!(matches!(err, IndexError::EmptyInput));
    }

    #[test]
    fn test_build_rejects_mixed_dimensions() {
        let records = vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![1.0, 0.0, 0.0]),
        ];
        let err = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap_err();
        assert!(matches!(
            err,
            IndexError::Dimension {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_build_records_properties() {
        let records = vec![record("a", vec![1.0, 0.0]), record("b", vec![0.0, 1.0])];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert_eq!(index.dimension(), 2);
        assert_eq!(index.metric(), DistanceMetric::Cosine);
        assert_eq!(index.embedding_model(), "hash");
    }

    #[test]
    fn test_query_orders_by_similarity() {
        let records = vec![
            record("x-axis", vec![1.0, 0.0, 0.0]),
            record("y-axis", vec![0.0, 1.0, 0.0]),
            record("z-axis", vec![0.0, 0.0, 1.0]),
        ];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        let results = index.query(&[0.0, 1.0, 0.1], 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].segment.text, "y-axis");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_query_clamps_k_to_index_size() {
        let records = vec![record("a", vec![1.0, 0.0]), record("b", vec![0.0, 1.0])];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        let results = index.query(&[1.0, 0.0], 100).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_query_k_zero_returns_nothing() {
        let records = vec![record("a", vec![1.0, 0.0])];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        assert!(index.query(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_query_ties_break_by_insertion_order() {
        // Identical vectors: every score ties, so results must come back in
        // insertion order.
        let records = vec![
            record("first", vec![1.0, 0.0]),
            record("second", vec![1.0, 0.0]),
            record("third", vec![1.0, 0.0]),
        ];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        let results = index.query(&[1.0, 0.0], 3).unwrap();
        assert_eq!(results[0].segment.text, "first");
        assert_eq!(results[1].segment.text, "second");
        assert_eq!(results[2].segment.text, "third");
    }

    #[test]
    fn test_query_rejects_wrong_dimension() {
        let records = vec![record("a", vec![1.0, 0.0])];
        let index = FlatIndex::build(records, DistanceMetric::Cosine, "hash").unwrap();

        let err = index.query(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            IndexError::Dimension {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_l2_metric_prefers_nearest() {
        let records = vec![
            record("far", vec![10.0, 10.0]),
            record("near", vec![1.0, 1.1]),
        ];
        let index = FlatIndex::build(records, DistanceMetric::L2, "hash").unwrap();

        let results = index.query(&[1.0, 1.0], 2).unwrap();
        assert_eq!(results[0].segment.text, "near");
        // Negated distances: nearer means higher score
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_stats() {
        let records = vec![record("a", vec![1.0, 0.0, 0.0])];
        let index = FlatIndex::build(records, DistanceMetric::L2, "text-embedding-3-small")
            .unwrap();

        let stats = index.stats();
        assert_eq!(stats.segment_count, 1);
        assert_eq!(stats.dimension, 3);
        assert_eq!(stats.metric, DistanceMetric::L2);
        assert_eq!(stats.embedding_model, "text-embedding-3-small");
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_l2_distance() {
        assert_eq!(l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(l2_distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }
}
