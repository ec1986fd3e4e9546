//! # pdfrag-index
//!
//! The ingest side of the pdfrag pipeline: load a document, split it into
//! segments, embed them, build a [`FlatIndex`](pdfrag_store::FlatIndex), and
//! persist it. The persisted artifact is the only state shared with the
//! query side, so ingestion and querying can run in separate processes.

pub mod ingest;

pub use ingest::{IngestConfig, Ingestor};
