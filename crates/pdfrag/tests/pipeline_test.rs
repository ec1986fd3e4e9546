//! Integration tests for the full pdfrag pipeline.
//!
//! Tests the complete flow: load → chunk → embed → index → persist → reload
//! → retrieve → answer, using the offline embedder and mock collaborators.

use async_trait::async_trait;
use pdfrag_core::{
    AnswerGenerator, DocumentLoader, Error, GenerationError, IndexError, LoadError, PageRecord,
};
use pdfrag_embed::HashEmbedder;
use pdfrag_extract::LoaderRegistry;
use pdfrag_index::{IngestConfig, Ingestor};
use pdfrag_llm::PromptTemplate;
use pdfrag_query::{AnswerPipeline, Retriever};
use pdfrag_store::FlatIndex;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Generator that records prompts and returns a canned answer.
struct CannedGenerator {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl AnswerGenerator for CannedGenerator {
    fn model_name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Loader that serves a fixed two-page document for `.twopage` paths.
struct TwoPageLoader;

#[async_trait]
impl DocumentLoader for TwoPageLoader {
    fn name(&self) -> &str {
        "twopage"
    }

    fn can_load(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "twopage")
    }

    async fn load(&self, path: &Path) -> Result<Vec<PageRecord>, LoadError> {
        Ok(vec![
            PageRecord {
                text: "A\nB".to_string(),
                page_number: 1,
                source_path: path.to_path_buf(),
            },
            PageRecord {
                text: "C".to_string(),
                page_number: 2,
                source_path: path.to_path_buf(),
            },
        ])
    }
}

#[tokio::test]
async fn test_full_pipeline_ingest_persist_reload_answer() {
    let dir = tempdir().unwrap();

    let doc = dir.path().join("notes.txt");
    std::fs::write(
        &doc,
        "Neural networks are inspired by the brain.\n\
         SQL queries relational databases.\n\
         OAuth2 is an authentication protocol.",
    )
    .unwrap();
    let index_path = dir.path().join("index");

    // Ingest in one "process"
    let ingestor = Ingestor::new(
        Arc::new(LoaderRegistry::standard()),
        Arc::new(HashEmbedder::new()),
        IngestConfig::default(),
    );
    let stats = ingestor.ingest(&doc, &index_path).await.unwrap();
    assert_eq!(stats.segment_count, 3);
    assert_eq!(stats.embedding_model, "hash");

    // Answer in a fresh one, sharing only the artifact
    let retriever = Retriever::open(&index_path, Arc::new(HashEmbedder::new())).unwrap();
    let generator = Arc::new(CannedGenerator::new("Databases are queried with SQL."));
    let pipeline = AnswerPipeline::new(
        retriever,
        generator.clone(),
        PromptTemplate::default(),
        1,
    );

    let answer = pipeline
        .answer("SQL queries relational databases.")
        .await
        .unwrap();

    assert_eq!(answer.text, "Databases are queried with SQL.");
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].page_number, 1);

    // The top segment must have been stuffed into the prompt
    let prompt = generator.last_prompt();
    assert!(prompt.contains("SQL queries relational databases."));
    assert!(prompt.contains("Question: SQL queries relational databases."));
}

#[tokio::test]
async fn test_two_page_document_segments_and_retrieval() {
    // Page 1 = "A\nB", page 2 = "C", separator "\n": expect segments
    // A, B, C with their page numbers, and a query nearest to B's
    // embedding returning B first.
    let dir = tempdir().unwrap();
    let index_path = dir.path().join("index");

    let mut loaders = LoaderRegistry::new();
    loaders.register(TwoPageLoader);

    let ingestor = Ingestor::new(
        Arc::new(loaders),
        Arc::new(HashEmbedder::new()),
        IngestConfig::default(),
    );
    let stats = ingestor
        .ingest(Path::new("/virtual/doc.twopage"), &index_path)
        .await
        .unwrap();
    assert_eq!(stats.segment_count, 3);

    let index = FlatIndex::load(&index_path).unwrap();
    let retriever = Retriever::new(index, Arc::new(HashEmbedder::new()));

    let all = retriever.retrieve_scored("A", 3).await.unwrap();
    let texts: Vec<&str> = all.iter().map(|s| s.segment.text.as_str()).collect();
    assert!(texts.contains(&"A"));
    assert!(texts.contains(&"B"));
    assert!(texts.contains(&"C"));
    for scored in &all {
        let expected_page = if scored.segment.text == "C" { 2 } else { 1 };
        assert_eq!(scored.segment.metadata.page_number, expected_page);
    }

    let top = retriever.retrieve("B", 1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].text, "B");
}

#[tokio::test]
async fn test_ask_against_missing_index_is_not_found() {
    let dir = tempdir().unwrap();

    let err = Retriever::open(
        &dir.path().join("never_ingested"),
        Arc::new(HashEmbedder::new()),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Index(IndexError::NotFound(_))));
}

#[tokio::test]
async fn test_reingest_replaces_artifact_for_queries() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    let index_path = dir.path().join("index");

    let ingestor = Ingestor::new(
        Arc::new(LoaderRegistry::standard()),
        Arc::new(HashEmbedder::new()),
        IngestConfig::default(),
    );

    std::fs::write(&doc, "old fact").unwrap();
    ingestor.ingest(&doc, &index_path).await.unwrap();

    std::fs::write(&doc, "new fact one\nnew fact two").unwrap();
    ingestor.ingest(&doc, &index_path).await.unwrap();

    let retriever = Retriever::open(&index_path, Arc::new(HashEmbedder::new())).unwrap();
    assert_eq!(retriever.index().len(), 2);

    let results = retriever.retrieve("new fact two", 2).await.unwrap();
    assert_eq!(results[0].text, "new fact two");
    assert!(results.iter().all(|s| s.text != "old fact"));
}
