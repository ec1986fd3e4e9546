//! Separator-based chunking.

use pdfrag_core::{PageRecord, Segment};
use tracing::debug;

/// Splits page text strictly on a literal separator string.
///
/// Empty pieces are discarded; every surviving segment carries the
/// originating page's metadata unchanged. Output order is page order, then
/// within-page split order. Text is not trimmed, so the non-empty pieces of
/// a page rejoined by the separator reconstruct the page text exactly
/// whenever the split produced no empty pieces.
#[derive(Debug, Clone)]
pub struct SeparatorChunker {
    separator: String,
}

impl SeparatorChunker {
    /// Create a chunker splitting on the given separator.
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// The separator this chunker splits on.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Split pages into segments.
    #[must_use]
    pub fn split(&self, pages: &[PageRecord]) -> Vec<Segment> {
        let mut segments = Vec::new();

        for page in pages {
            for piece in page.text.split(self.separator.as_str()) {
                if piece.is_empty() {
                    continue;
                }
                segments.push(Segment::from_page(piece.to_string(), page));
            }
        }

        debug!(
            "Split {} pages into {} segments (separator {:?})",
            pages.len(),
            segments.len(),
            self.separator
        );
        segments
    }
}

impl Default for SeparatorChunker {
    fn default() -> Self {
        Self::new("\n")
    }
}
