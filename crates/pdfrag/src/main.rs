//! # pdfrag CLI
//!
//! Command-line interface for pdfrag: ingest a document into a local vector
//! index, then ask questions against it.
//!
//! ## Commands
//!
//! - `pdfrag ingest <FILE> <INDEX_PATH>` - Build and persist the index
//! - `pdfrag ask <QUESTION> <INDEX_PATH>` - Answer a question from the index
//! - `pdfrag status <INDEX_PATH>` - Show index statistics
//! - `pdfrag config` - Inspect configuration
//!
//! ## Examples
//!
//! ```bash
//! # Ingest a paper
//! pdfrag ingest react.pdf ./react_index
//!
//! # Ask about it
//! pdfrag ask "What is ReAct in 3 sentences?" ./react_index
//!
//! # Get JSON output with sources
//! pdfrag ask "What is ReAct?" ./react_index --format json
//! ```
//!
//! Ingestion and querying are separate invocations sharing only the persisted
//! index artifact, so a document is embedded once no matter how many
//! questions follow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfrag_core::{AnswerGenerator, Embedder};
use pdfrag_embed::{HashEmbedder, OpenAiEmbedder, OpenAiEmbedderConfig};
use pdfrag_extract::LoaderRegistry;
use pdfrag_index::{IngestConfig, Ingestor};
use pdfrag_llm::{OpenAiGenerator, OpenAiGeneratorConfig, PromptTemplate};
use pdfrag_query::{AnswerPipeline, Retriever};
use pdfrag_store::FlatIndex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

use config::{Config, EmbeddingProvider};

#[derive(Parser)]
#[command(name = "pdfrag")]
#[command(about = "Ask questions about a PDF from the command line")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/pdfrag/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a document into a persisted index
    Ingest {
        /// Document to ingest (PDF or plain text)
        file: PathBuf,

        /// Where to write the index artifact
        index_path: PathBuf,

        /// Separator to split page text on (default from config)
        #[arg(short, long)]
        separator: Option<String>,
    },

    /// Answer a question against a persisted index
    Ask {
        /// The question
        question: String,

        /// Path of a previously ingested index
        index_path: PathBuf,

        /// Number of segments to retrieve (default from config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Show index statistics
    Status {
        /// Path of a previously ingested index
        index_path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

/// Output structure for `ask`.
#[derive(Serialize)]
struct AnswerOutput {
    question: String,
    answer: String,
    sources: Vec<SourceOutput>,
}

#[derive(Serialize)]
struct SourceOutput {
    file: String,
    page: u32,
}

/// Output structure for `status`.
#[derive(Serialize)]
struct StatusOutput {
    path: String,
    segments: u64,
    dimension: usize,
    metric: String,
    embedding_model: String,
    created_at: String,
}

/// Build the configured embedder.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match config.embedding.provider {
        EmbeddingProvider::OpenAi => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY is not set")?;
            let embedder = OpenAiEmbedder::new(OpenAiEmbedderConfig {
                api_key,
                base_url: config.embedding.base_url.clone(),
                model: config.embedding.model.clone(),
                dimensions: config.embedding.dimensions,
                ..Default::default()
            })
            .context("failed to build embeddings client")?;
            Ok(Arc::new(embedder))
        }
        EmbeddingProvider::Hash => {
            let dimension = config.embedding.dimensions.unwrap_or(64);
            Ok(Arc::new(HashEmbedder::with_dimension(dimension)))
        }
    }
}

/// Build the configured answer generator.
fn build_generator(config: &Config) -> Result<Arc<dyn AnswerGenerator>> {
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    let generator = OpenAiGenerator::new(OpenAiGeneratorConfig {
        api_key,
        base_url: config.generation.base_url.clone(),
        model: config.generation.model.clone(),
        temperature: config.generation.temperature,
        max_tokens: config.generation.max_tokens,
        ..Default::default()
    })
    .context("failed to build generation client")?;
    Ok(Arc::new(generator))
}

/// Build the prompt template, honoring a config override.
fn build_prompt(config: &Config) -> Result<PromptTemplate> {
    match &config.generation.prompt_template {
        Some(template) => PromptTemplate::new(template.clone())
            .context("invalid prompt_template in config"),
        None => Ok(PromptTemplate::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = Config::load_from(cli.config.clone()).context("Failed to load config")?;

    match cli.command {
        Commands::Ingest {
            file,
            index_path,
            separator,
        } => {
            if !file.exists() {
                anyhow::bail!("load error: document does not exist: {}", file.display());
            }

            let embedder = build_embedder(&config)?;
            let ingest_config = IngestConfig {
                separator: separator.unwrap_or_else(|| config.chunking.separator.clone()),
                batch_size: config.embedding.batch_size,
                metric: config.index.metric,
            };

            let ingestor = Ingestor::new(
                Arc::new(LoaderRegistry::standard()),
                embedder,
                ingest_config,
            );

            let stats = ingestor.ingest(&file, &index_path).await?;
            info!(
                "Ingested {} segments into {}",
                stats.segment_count,
                index_path.display()
            );

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
                OutputFormat::Text => {
                    println!(
                        "Ingested {} segments ({}d, {}) into {}",
                        stats.segment_count,
                        stats.dimension,
                        stats.metric,
                        index_path.display()
                    );
                }
            }
        }

        Commands::Ask {
            question,
            index_path,
            top_k,
        } => {
            let embedder = build_embedder(&config)?;
            let generator = build_generator(&config)?;
            let prompt = build_prompt(&config)?;
            let k = top_k.unwrap_or(config.query.top_k);

            let retriever = Retriever::open(&index_path, embedder)?;
            let pipeline = AnswerPipeline::new(retriever, generator, prompt, k);

            let answer = pipeline.answer(&question).await?;

            match cli.format {
                OutputFormat::Json => {
                    let output = AnswerOutput {
                        question,
                        answer: answer.text,
                        sources: answer
                            .sources
                            .iter()
                            .map(|s| SourceOutput {
                                file: s.source_path.to_string_lossy().to_string(),
                                page: s.page_number,
                            })
                            .collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("{}", answer.text.trim());
                    if !answer.sources.is_empty() {
                        println!();
                        for source in &answer.sources {
                            println!(
                                "  [{} p.{}]",
                                source.source_path.display(),
                                source.page_number
                            );
                        }
                    }
                }
            }
        }

        Commands::Status { index_path } => {
            let index = FlatIndex::load(&index_path)?;
            let stats = index.stats();

            match cli.format {
                OutputFormat::Json => {
                    let output = StatusOutput {
                        path: index_path.to_string_lossy().to_string(),
                        segments: stats.segment_count,
                        dimension: stats.dimension,
                        metric: stats.metric.to_string(),
                        embedding_model: stats.embedding_model,
                        created_at: stats.created_at.to_rfc3339(),
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("Index at {}", index_path.display());
                    println!("  Segments:  {}", stats.segment_count);
                    println!("  Dimension: {}", stats.dimension);
                    println!("  Metric:    {}", stats.metric);
                    println!("  Model:     {}", stats.embedding_model);
                    println!(
                        "  Created:   {}",
                        stats.created_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
                OutputFormat::Text => {
                    println!("{}", toml::to_string_pretty(&config)?);
                }
            },
            ConfigAction::Init => {
                println!("{}", Config::sample_toml());
            }
            ConfigAction::Path => {
                if let Some(path) = Config::config_path() {
                    println!("{}", path.display());
                } else {
                    println!("Could not determine config directory");
                }
            }
        },
    }

    Ok(())
}
