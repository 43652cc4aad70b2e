use std::path::Path;

use chrono::NaiveDate;

use papermeta_core::{
    DEFAULT_PDF_BASE_URL, DEFAULT_UPLOADER, INSTITUTION_NOT_SPECIFIED, JOURNAL_SOURCE_UNKNOWN,
    MetadataRecord, ReviewStatus, UNDETERMINED_AUTHOR,
};

use crate::authors::{MIN_LINES, detect_author_match};
use crate::config::ParsingConfig;
use crate::identifiers::{document_id, extract_doi, extract_year_with_config};
use crate::text_processing::{char_prefix, normalize_lines};

/// Characters of raw page text kept as `contentPreview`.
pub const PREVIEW_CHARS: usize = 500;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// The input document as seen by the record assembler.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    /// Base name including extension.
    pub filename: &'a str,
    pub size_bytes: u64,
}

/// Constant fields stamped onto every record.
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub uploader: String,
    /// Prefix for `pdfUrl`; the filename is appended after a single `/`.
    pub pdf_base_url: String,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            uploader: DEFAULT_UPLOADER.to_string(),
            pdf_base_url: DEFAULT_PDF_BASE_URL.to_string(),
        }
    }
}

/// Heuristic results for one page of text. `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub author: Option<String>,
    pub year: Option<String>,
    pub doi: Option<String>,
}

/// Run every extractor over raw first-page text.
///
/// Text that normalizes to fewer than three lines yields nothing at all.
pub fn extract_fields(text: &str, config: &ParsingConfig) -> ExtractedFields {
    let lines = normalize_lines(text);
    if lines.len() < MIN_LINES {
        tracing::debug!(lines = lines.len(), "too few lines for extraction");
        return ExtractedFields::default();
    }

    ExtractedFields {
        author: detect_author_match(&lines[..], config).map(|m| m.name),
        year: extract_year_with_config(text, config),
        doi: extract_doi(text),
    }
}

/// Build the output record for one document.
///
/// `page_text` is `None` when the document could not be read; the record is
/// still produced with the placeholder author and no preview.
pub fn assemble_record(
    file: SourceFile<'_>,
    page_text: Option<&str>,
    fields: ExtractedFields,
    options: &RecordOptions,
    upload_date: NaiveDate,
) -> MetadataRecord {
    let title = Path::new(file.filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.filename.to_string());

    MetadataRecord {
        id: document_id(file.filename),
        filename: file.filename.to_string(),
        title,
        uploader: options.uploader.clone(),
        detected_author: fields
            .author
            .unwrap_or_else(|| UNDETERMINED_AUTHOR.to_string()),
        author_institution: INSTITUTION_NOT_SPECIFIED.to_string(),
        publication_year: fields.year,
        journal_source: JOURNAL_SOURCE_UNKNOWN.to_string(),
        doi: fields.doi,
        pdf_url: format!(
            "{}/{}",
            options.pdf_base_url.trim_end_matches('/'),
            file.filename
        ),
        upload_date: upload_date.format("%Y-%m-%d").to_string(),
        status: ReviewStatus::Pending,
        file_size: format_size(file.size_bytes),
        content_preview: page_text.map(|text| char_prefix(text, PREVIEW_CHARS).to_string()),
    }
}

/// `1572864` → `"1.50 MB"`
fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
