//! Core types for pdfrag.
//!
//! Shared data structures used across the pipeline:
//!
//! - [`PageRecord`]: one page of loaded document text
//! - [`Segment`]: a chunk of page text, the unit of retrieval
//! - [`VectorRecord`]: a segment paired with its embedding
//! - [`ScoredSegment`]: a query hit with its similarity score
//! - [`DistanceMetric`]: vector similarity calculation method
//! - [`IndexStats`]: summary of a persisted index artifact

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ============================================================================
// Pages
// ============================================================================

/// One page of text produced by a document loader.
///
/// Page records are transient: they exist between loading and chunking, and
/// their metadata is carried forward onto every segment derived from them.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Extracted page text
    pub text: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Path of the source document
    pub source_path: PathBuf,
}

// ============================================================================
// Segments
// ============================================================================

/// Provenance attached to every segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    /// Path of the source document
    pub source_path: PathBuf,
    /// Page the segment came from (1-indexed)
    pub page_number: u32,
}

/// A chunk of source text, the unit of retrieval.
///
/// Segment text is never empty: the chunker drops empty pieces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Unique segment identifier
    pub id: Uuid,
    /// The segment text
    pub text: String,
    /// Provenance of the segment
    pub metadata: SegmentMetadata,
}

impl Segment {
    /// Create a segment derived from the given page.
    #[must_use]
    pub fn from_page(text: String, page: &PageRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            metadata: SegmentMetadata {
                source_path: page.source_path.clone(),
                page_number: page.page_number,
            },
        }
    }
}

// ============================================================================
// Vectors
// ============================================================================

/// A segment paired with its embedding, as stored in the index.
///
/// Created once at ingest time and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Embedding vector (fixed length across an index)
    pub vector: Vec<f32>,
    /// The embedded segment
    pub segment: Segment,
}

/// A query hit: a segment and its similarity score.
///
/// Higher scores are more similar under either metric (L2 distances are
/// negated at scoring time).
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSegment {
    /// The matching segment
    pub segment: Segment,
    /// Similarity score
    pub score: f32,
}

// ============================================================================
// Metrics
// ============================================================================

/// Similarity metric for vector search.
///
/// Fixed when an index is built, recorded in its manifest, and reused for
/// every query against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    L2,
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cosine => write!(f, "cosine"),
            Self::L2 => write!(f, "l2"),
        }
    }
}

// ============================================================================
// Index Stats
// ============================================================================

/// Summary of a built or persisted index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of segments in the index
    pub segment_count: u64,
    /// Embedding dimension
    pub dimension: usize,
    /// Similarity metric used at build time
    pub metric: DistanceMetric,
    /// Name of the embedding model used at ingest
    pub embedding_model: String,
    /// When the index was built
    pub created_at: DateTime<Utc>,
}
