//! Error types for pdfrag.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pdfrag operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Document loading failed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Embedding generation failed
    #[error("embedding error: {0}")]
    Embed(#[from] EmbedError),

    /// Vector index operation failed
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Answer synthesis failed
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Document loading errors.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported file type: {}", .0.display())]
    UnsupportedType(PathBuf),
}

/// Embedding errors.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("embedding count mismatch: expected {expected}, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("empty embedding result")]
    Empty,
}

/// Vector index errors.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("no segments to index")]
    EmptyInput,

    #[error("index not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("corrupt index: {0}")]
    Corrupt(String),

    #[error("dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Answer synthesis errors.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty answer from model")]
    EmptyAnswer,
}

/// Result type alias for pdfrag operations.
pub type Result<T> = std::result::Result<T, Error>;
