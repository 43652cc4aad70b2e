use std::path::PathBuf;

use thiserror::Error;

mod export;

pub use export::{export_json, export_records, export_typescript};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of records.
    Json,
    /// TypeScript module exporting the records as `JournalMetadata[]`.
    TypeScript,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::TypeScript]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::TypeScript => "TypeScript",
        }
    }
}
