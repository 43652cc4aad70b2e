use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use papermeta_core::{
    BatchResult, BatchStats, DEFAULT_EXTRACTION_TIMEOUT_SECS, DEFAULT_INPUT_FOLDER, PdfBackend,
    ProgressEvent,
};
use papermeta_parsing::{ParsingConfig, RecordOptions, SourceFile};

use crate::{IngestError, list_documents};

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub record: RecordOptions,
    pub parsing: ParsingConfig,
    /// Per-document limit on first-page text extraction.
    pub timeout: Duration,
    /// Stamped on every record as `uploadDate`.
    pub upload_date: NaiveDate,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_FOLDER),
            record: RecordOptions::default(),
            parsing: ParsingConfig::default(),
            timeout: Duration::from_secs(DEFAULT_EXTRACTION_TIMEOUT_SECS),
            upload_date: Local::now().date_naive(),
        }
    }
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }
}

/// Turn every PDF in `config.input_dir` into a metadata record.
///
/// Documents are processed one at a time in filename order. Every document
/// yields exactly one record: unreadable ones get the placeholder author and
/// a `ReadFailed` event instead of aborting the batch. Only a folder that
/// exists but cannot be listed is an error.
pub async fn process_folder<F>(
    config: &BatchConfig,
    backend: Arc<dyn PdfBackend>,
    progress: F,
) -> Result<BatchResult, IngestError>
where
    F: Fn(ProgressEvent),
{
    let documents = list_documents(&config.input_dir)?;
    let total = documents.len();
    tracing::info!(folder = %config.input_dir.display(), total, "starting batch");
    progress(ProgressEvent::Started {
        folder: config.input_dir.clone(),
        total,
    });

    let mut result = BatchResult {
        records: Vec::with_capacity(total),
        stats: BatchStats {
            total,
            ..BatchStats::default()
        },
    };

    for (index, path) in documents.iter().enumerate() {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress(ProgressEvent::Processing {
            index,
            total,
            filename: filename.clone(),
        });

        let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let page_text = match read_first_page(&backend, path, config.timeout).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(file = %filename, error = %e, "could not read first page");
                result.stats.read_failures += 1;
                progress(ProgressEvent::ReadFailed {
                    index,
                    total,
                    filename: filename.clone(),
                    message: e.to_string(),
                });
                None
            }
        };

        let fields = page_text
            .as_deref()
            .map(|text| papermeta_parsing::extract_fields(text, &config.parsing))
            .unwrap_or_default();
        let record = papermeta_parsing::assemble_record(
            SourceFile {
                filename: &filename,
                size_bytes,
            },
            page_text.as_deref(),
            fields,
            &config.record,
            config.upload_date,
        );

        if record.has_detected_author() {
            result.stats.succeeded += 1;
        } else {
            result.stats.failed += 1;
        }

        if page_text.is_some() {
            progress(ProgressEvent::Extracted {
                index,
                total,
                record: Box::new(record.clone()),
            });
        }
        result.records.push(record);
    }

    tracing::info!(
        succeeded = result.stats.succeeded,
        failed = result.stats.failed,
        read_failures = result.stats.read_failures,
        "batch complete"
    );
    Ok(result)
}

/// Run the blocking backend call on the blocking pool, bounded by `timeout`.
///
/// A timed-out worker is abandoned, not cancelled; its result is discarded.
async fn read_first_page(
    backend: &Arc<dyn PdfBackend>,
    path: &Path,
    timeout: Duration,
) -> Result<String, IngestError> {
    let backend = Arc::clone(backend);
    let owned = path.to_path_buf();
    let task = tokio::task::spawn_blocking(move || backend.first_page_text(&owned));

    let text = match tokio::time::timeout(timeout, task).await {
        Err(_) => return Err(IngestError::Timeout(timeout)),
        Ok(Err(join)) => return Err(IngestError::Worker(join.to_string())),
        Ok(Ok(extracted)) => extracted?,
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyPage);
    }
    Ok(text)
}
