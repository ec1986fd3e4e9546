//! Plain text document loader.

use async_trait::async_trait;
use pdfrag_core::{DocumentLoader, LoadError, PageRecord};
use std::path::Path;
use tokio::fs;

/// Loader for plain text files. The whole file becomes a single page.
pub struct TextLoader;

impl TextLoader {
    /// Create a new text loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for TextLoader {
    fn name(&self) -> &str {
        "text"
    }

    fn can_load(&self, path: &Path) -> bool {
        let extensions = ["txt", "md", "markdown"];
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()))
    }

    async fn load(&self, path: &Path) -> Result<Vec<PageRecord>, LoadError> {
        let text = fs::read_to_string(path).await?;

        Ok(vec![PageRecord {
            text,
            page_number: 1,
            source_path: path.to_path_buf(),
        }])
    }
}
