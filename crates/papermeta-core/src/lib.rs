use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, PdfBackend};

/// Placeholder for `detectedAuthor` when no heuristic produced a validated name.
///
/// The admin dashboard keys its "needs review" badge on this exact string.
pub const UNDETERMINED_AUTHOR: &str = "Author Belum Terdeteksi (Perlu Review Manual)";

/// Institution placeholder; institutions are never extracted.
pub const INSTITUTION_NOT_SPECIFIED: &str = "Not specified";

/// Journal source placeholder; sources are never extracted.
pub const JOURNAL_SOURCE_UNKNOWN: &str = "Unknown";

pub const DEFAULT_UPLOADER: &str = "Kontributor (System)";
pub const DEFAULT_PDF_BASE_URL: &str = "./data_jurnal";
pub const DEFAULT_INPUT_FOLDER: &str = "data_jurnal";
pub const DEFAULT_JSON_OUTPUT: &str = "journals_metadata.json";
pub const DEFAULT_TYPESCRIPT_OUTPUT: &str = "src/lib/journals_metadata.ts";
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Namespace tag in front of every document identifier.
pub const ID_PREFIX: &str = "journal-";

/// Review lifecycle of a record. Always `Pending` when produced here;
/// transitions belong to the editorial workflow downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Metadata extracted from one input document.
///
/// Field names serialize in camelCase and are a stable contract with the
/// review dashboard. Absent year/DOI serialize as `null`; a missing preview
/// (unreadable document) is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub uploader: String,
    pub detected_author: String,
    pub author_institution: String,
    pub publication_year: Option<String>,
    pub journal_source: String,
    pub doi: Option<String>,
    pub pdf_url: String,
    pub upload_date: String,
    pub status: ReviewStatus,
    pub file_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
}

impl MetadataRecord {
    /// Whether the author field holds a detected name rather than the placeholder.
    pub fn has_detected_author(&self) -> bool {
        self.detected_author != UNDETERMINED_AUTHOR
    }
}

/// Counters for a batch run.
///
/// `failed` counts both unreadable documents and documents whose author
/// could not be determined; `read_failures` breaks out the former.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub read_failures: usize,
}

impl BatchStats {
    /// Percentage of documents with a detected author (0.0 for an empty batch).
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64 * 100.0
        }
    }

    /// Documents that were read but yielded no author.
    pub fn undetermined(&self) -> usize {
        self.failed.saturating_sub(self.read_failures)
    }
}

/// Records in input order plus aggregate counters.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<MetadataRecord>,
    pub stats: BatchStats,
}

/// Progress events emitted by the batch driver. `index` is zero-based.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        folder: PathBuf,
        total: usize,
    },
    Processing {
        index: usize,
        total: usize,
        filename: String,
    },
    Extracted {
        index: usize,
        total: usize,
        record: Box<MetadataRecord>,
    },
    /// The page text could not be obtained; a placeholder record was still produced.
    ReadFailed {
        index: usize,
        total: usize,
        filename: String,
        message: String,
    },
}
