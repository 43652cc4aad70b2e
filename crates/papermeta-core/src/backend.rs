use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("document has no pages")]
    NoPages,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for page-text extraction backends.
///
/// Only the first page is ever needed: title, authors, affiliations and the
/// DOI line live there. Everything downstream of this call is pure text
/// processing in `papermeta_parsing`.
pub trait PdfBackend: Send + Sync {
    /// Extract the raw text of the document's first page.
    fn first_page_text(&self, path: &Path) -> Result<String, BackendError>;
}
