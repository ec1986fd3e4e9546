//! # pdfrag-core
//!
//! Core types and traits for the pdfrag retrieval-QA pipeline.
//!
//! This crate provides the foundational abstractions used throughout pdfrag:
//!
//! - **Document Loading**: [`DocumentLoader`] trait producing page-level text
//! - **Embedding Generation**: [`Embedder`] trait converting text to vectors
//! - **Answer Synthesis**: [`AnswerGenerator`] trait turning a prompt into an answer
//!
//! ## Architecture
//!
//! The crate is organized around a two-phase pipeline:
//!
//! ```text
//! ingest: File → DocumentLoader → SeparatorChunker → Embedder → FlatIndex → disk
//! query:  Question → Embedder → FlatIndex → PromptTemplate → AnswerGenerator
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PageRecord`] | One page of loaded document text |
//! | [`Segment`] | A chunk of page text, the unit of retrieval |
//! | [`VectorRecord`] | A segment paired with its embedding |
//! | [`ScoredSegment`] | A query hit with its similarity score |
//! | [`IndexStats`] | Summary of a persisted index artifact |
//!
//! ## Related Crates
//!
//! - `pdfrag-extract`: document loader implementations
//! - `pdfrag-chunker`: separator-based splitting
//! - `pdfrag-embed`: hosted and offline embedders
//! - `pdfrag-store`: the flat vector index and its persistence
//! - `pdfrag-index`: the ingest pipeline
//! - `pdfrag-llm`: prompt template and answer generation
//! - `pdfrag-query`: retrieval and answer orchestration

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EmbedError, Error, GenerationError, IndexError, LoadError, Result};
pub use traits::*;
pub use types::*;
