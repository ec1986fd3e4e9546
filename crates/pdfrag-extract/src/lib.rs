//! # pdfrag-extract
//!
//! Document loaders for pdfrag.
//!
//! A loader turns a file path into an ordered sequence of
//! [`PageRecord`](pdfrag_core::PageRecord)s. Two loaders are provided:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PdfLoader`] | Per-page text extraction from PDF files |
//! | [`TextLoader`] | Plain text files as a single page |
//! | [`LoaderRegistry`] | Dispatches to the first loader that accepts a path |

pub mod pdf;
pub mod registry;
pub mod text;

pub use pdf::PdfLoader;
pub use registry::LoaderRegistry;
pub use text::TextLoader;
