//! # pdfrag-chunker
//!
//! Separator-based splitting of page text into retrieval segments.
//!
//! The only splitting rule is a literal separator string; there is no
//! size-based re-chunking, overlap, or token-aware splitting. A size-aware
//! strategy would plug in here if documents outgrow delimiter-based division.

pub mod separator;

pub use separator::SeparatorChunker;
