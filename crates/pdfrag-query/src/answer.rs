//! Answer synthesis over retrieved segments.

use pdfrag_core::{AnswerGenerator, GenerationError, Result, Segment};
use pdfrag_llm::PromptTemplate;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::Retriever;

/// Where an answer's context came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    /// Source document path
    pub source_path: PathBuf,
    /// Page number (1-indexed)
    pub page_number: u32,
}

/// A synthesized answer and the pages that supported it.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// The answer text
    pub text: String,
    /// Distinct source pages of the retrieved context, retrieval order
    pub sources: Vec<SourceRef>,
}

/// The query pipeline: retrieve top-k segments, render the prompt, generate.
pub struct AnswerPipeline {
    retriever: Retriever,
    generator: Arc<dyn AnswerGenerator>,
    prompt: PromptTemplate,
    k: usize,
}

impl AnswerPipeline {
    /// Create a new answer pipeline retrieving `k` segments per question.
    pub fn new(
        retriever: Retriever,
        generator: Arc<dyn AnswerGenerator>,
        prompt: PromptTemplate,
        k: usize,
    ) -> Self {
        Self {
            retriever,
            generator,
            prompt,
            k,
        }
    }

    /// Answer a question against the index.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        info!("Answering: {}", question);

        let segments = self.retriever.retrieve(question, self.k).await?;
        debug!("Using {} context segments", segments.len());

        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        let rendered = self.prompt.render(&texts, question);

        let text = self.generator.generate(&rendered).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyAnswer.into());
        }

        Ok(Answer {
            text,
            sources: sources_of(&segments),
        })
    }
}

/// Distinct source pages in retrieval order.
fn sources_of(segments: &[Segment]) -> Vec<SourceRef> {
    let mut sources: Vec<SourceRef> = Vec::new();
    for segment in segments {
        let source = SourceRef {
            source_path: segment.metadata.source_path.clone(),
            page_number: segment.metadata.page_number,
        };
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    sources
}
