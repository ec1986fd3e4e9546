//! Configuration handling for the pdfrag CLI.
//!
//! Settings come from a TOML file; the API key comes only from the
//! environment (`OPENAI_API_KEY`), never from the file.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pdfrag_core::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Generation configuration
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingSettings,

    /// Index configuration
    #[serde(default)]
    pub index: IndexSettings,

    /// Query configuration
    #[serde(default)]
    pub query: QuerySettings,
}

/// Which embedder to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Hosted OpenAI-compatible embeddings
    #[default]
    OpenAi,
    /// Deterministic offline embeddings (no network, no semantics)
    Hash,
}

/// Embedding-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Embedding provider
    #[serde(default)]
    pub provider: EmbeddingProvider,

    /// Model to use
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Requested output dimensions, if the model supports shortening
    #[serde(default)]
    pub dimensions: Option<usize>,

    /// Segments per embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_batch_size() -> usize {
    32
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: default_embedding_model(),
            base_url: default_base_url(),
            dimensions: None,
            batch_size: default_batch_size(),
        }
    }
}

/// Generation-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Chat model to use
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Override for the built-in prompt template; must contain
    /// `{context}` and `{question}` placeholders
    #[serde(default)]
    pub prompt_template: Option<String>,
}

fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> usize {
    1024
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            prompt_template: None,
        }
    }
}

/// Chunking-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSettings {
    /// Separator to split page text on
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    "\n".to_string()
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

/// Index-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexSettings {
    /// Similarity metric fixed at ingest time
    #[serde(default)]
    pub metric: DistanceMetric,
}

/// Query-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Number of segments retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    4
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or from the default location
    /// when `path` is `None`. A missing default file yields the defaults; an
    /// explicitly named file must exist.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))
            }
            None => Self::load(),
        }
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Default config file path.
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// A sample configuration file with every default spelled out.
    pub fn sample_toml() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# failed to render sample config"))
    }
}

/// Get the config directory for pdfrag.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PDFRAG_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "pdfrag").map(|dirs| dirs.config_dir().to_path_buf())
}
