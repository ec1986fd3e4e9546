//! PDF document loader.
//!
//! Uses pdf-extract for per-page text extraction.

use async_trait::async_trait;
use pdfrag_core::{DocumentLoader, LoadError, PageRecord};
use std::path::Path;
use tracing::debug;

/// Loader for PDF files.
pub struct PdfLoader;

impl PdfLoader {
    /// Create a new PDF loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    fn name(&self) -> &str {
        "pdf"
    }

    fn can_load(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    async fn load(&self, path: &Path) -> Result<Vec<PageRecord>, LoadError> {
        debug!("Loading PDF: {:?}", path);

        let bytes = tokio::fs::read(path).await?;

        // pdf-extract is blocking
        let pages = tokio::task::spawn_blocking(move || extract_pages(&bytes))
            .await
            .map_err(|e| LoadError::Parse(format!("task join error: {e}")))??;

        let source_path = path.to_path_buf();
        let records: Vec<PageRecord> = pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageRecord {
                text,
                page_number: i as u32 + 1,
                source_path: source_path.clone(),
            })
            .collect();

        debug!("Loaded {} pages from {:?}", records.len(), path);
        Ok(records)
    }
}

/// Extract one text string per page from PDF bytes.
fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, LoadError> {
    pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| LoadError::Parse(e.to_string()))
}
