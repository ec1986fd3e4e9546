//! # pdfrag-query
//!
//! The query side of the pdfrag pipeline: embed a question, search the
//! persisted index for the most similar segments, and synthesize an answer
//! from them. Two fixed steps — retrieve, then generate — with no dynamic
//! chain composition.

pub mod answer;
pub mod retriever;

pub use answer::{Answer, AnswerPipeline, SourceRef};
pub use retriever::Retriever;
