use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub mod batch;

// Re-export domain types for convenience
pub use papermeta_core::{
    BackendError, BatchResult, BatchStats, MetadataRecord, PdfBackend, ProgressEvent,
};
pub use batch::{BatchConfig, process_folder};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("cannot read input folder {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF extraction error: {0}")]
    Backend(#[from] BackendError),
    #[error("page extraction timed out after {0:?}")]
    Timeout(Duration),
    #[error("page extraction worker failed: {0}")]
    Worker(String),
    #[error("first page contains no text")]
    EmptyPage,
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of papermeta-ingest)")]
    NoPdfSupport,
}

/// Whether `path` names a PDF by extension (`.pdf`, any case).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// List the PDF files directly inside `dir`, sorted by filename.
///
/// Subdirectories are not descended into. A folder that does not exist is
/// treated as empty.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(folder = %dir.display(), "input folder does not exist");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(IngestError::ReadDir {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_pdf_path(&path) {
            documents.push(path);
        }
    }
    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

/// The PDF backend compiled into this build.
///
/// Exclusion ratios are fractions of page height dropped from the top and
/// bottom of the first page; `0.0` keeps everything.
#[cfg(feature = "pdf")]
pub fn default_backend(
    header_exclusion: f32,
    footer_exclusion: f32,
) -> Result<Arc<dyn PdfBackend>, IngestError> {
    let backend = papermeta_pdf_mupdf::MupdfBackend::new()
        .with_header_exclusion(header_exclusion)
        .with_footer_exclusion(footer_exclusion);
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "pdf"))]
pub fn default_backend(
    _header_exclusion: f32,
    _footer_exclusion: f32,
) -> Result<Arc<dyn PdfBackend>, IngestError> {
    Err(IngestError::NoPdfSupport)
}
