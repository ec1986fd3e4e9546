//! Loader registry for dispatching files to document loaders.

use pdfrag_core::{DocumentLoader, LoadError, PageRecord};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Registry of document loaders.
///
/// Loaders are tried in registration order; the first whose `can_load`
/// accepts the path wins.
pub struct LoaderRegistry {
    loaders: Vec<Arc<dyn DocumentLoader>>,
}

impl LoaderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Create a registry with the standard loaders (PDF, plain text).
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(crate::PdfLoader::new());
        registry.register(crate::TextLoader::new());
        registry
    }

    /// Register a loader.
    pub fn register<L: DocumentLoader + 'static>(&mut self, loader: L) {
        self.loaders.push(Arc::new(loader));
    }

    /// Get a loader for the given path.
    #[must_use]
    pub fn get_for_path(&self, path: &Path) -> Option<Arc<dyn DocumentLoader>> {
        self.loaders
            .iter()
            .find(|loader| loader.can_load(path))
            .cloned()
    }

    /// Load a file with the appropriate loader.
    pub async fn load(&self, path: &Path) -> Result<Vec<PageRecord>, LoadError> {
        let loader = self
            .get_for_path(path)
            .ok_or_else(|| LoadError::UnsupportedType(path.to_path_buf()))?;

        debug!("Loading {:?} with '{}' loader", path, loader.name());
        loader.load(path).await
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PdfLoader, TextLoader};
    use tempfile::tempdir;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = LoaderRegistry::new();
        assert!(registry.get_for_path(Path::new("/a.txt")).is_none());
    }

    #[test]
    fn test_standard_registry_covers_pdf_and_text() {
        let registry = LoaderRegistry::standard();
        assert!(registry.get_for_path(Path::new("/a.pdf")).is_some());
        assert!(registry.get_for_path(Path::new("/a.txt")).is_some());
        assert!(registry.get_for_path(Path::new("/a.docx")).is_none());
    }

    #[test]
    fn test_get_for_path_picks_matching_loader() {
        let mut registry = LoaderRegistry::new();
        registry.register(PdfLoader::new());
        registry.register(TextLoader::new());

        let loader = registry.get_for_path(Path::new("/doc/notes.md")).unwrap();
        assert_eq!(loader.name(), "text");

        let loader = registry.get_for_path(Path::new("/doc/paper.pdf")).unwrap();
        assert_eq!(loader.name(), "pdf");
    }

    #[tokio::test]
    async fn test_load_unsupported_type() {
        let registry = LoaderRegistry::standard();

        let err = registry.load(Path::new("/doc/sheet.xlsx")).await.unwrap_err();
        match err {
            LoadError::UnsupportedType(path) => {
                assert_eq!(path, Path::new("/doc/sheet.xlsx"));
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_dispatches_to_text_loader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "hello").unwrap();

        let registry = LoaderRegistry::standard();
        let pages = registry.load(&path).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "hello");
    }
}
