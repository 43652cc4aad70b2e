use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;

use papermeta_core::{MetadataRecord, UNDETERMINED_AUTHOR};

use crate::{ExportError, ExportFormat};

/// Render `records` in `format` and write them to `path`, creating missing
/// parent directories.
///
/// `generated_at` is stamped into the TypeScript preamble and ignored for JSON.
pub fn export_records(
    records: &[MetadataRecord],
    format: ExportFormat,
    path: &Path,
    generated_at: NaiveDateTime,
) -> Result<(), ExportError> {
    let content = match format {
        ExportFormat::Json => export_json(records)?,
        ExportFormat::TypeScript => export_typescript(records, generated_at)?,
    };

    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = std::fs::File::create(path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;

    tracing::debug!(
        path = %path.display(),
        format = format.label(),
        records = records.len(),
        "export written"
    );
    Ok(())
}

/// Records as a pretty-printed JSON array (2-space indent, non-ASCII kept).
pub fn export_json(records: &[MetadataRecord]) -> Result<String, ExportError> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

const TS_INTERFACE: &str = "\
export interface JournalMetadata {
  id: string;
  filename: string;
  title: string;
  uploader: string;
  detectedAuthor: string;
  authorInstitution: string;
  publicationYear: string | null;
  journalSource: string;
  doi: string | null;
  pdfUrl: string;
  uploadDate: string;
  status: 'pending' | 'approved' | 'rejected';
  fileSize: string;
  contentPreview?: string;
}
";

/// Records as a TypeScript module for the review dashboard.
///
/// The module exports `extractedMetadata: JournalMetadata[]` both by name and
/// as the default export. Its array literal is the same JSON as [`export_json`].
pub fn export_typescript(
    records: &[MetadataRecord],
    generated_at: NaiveDateTime,
) -> Result<String, ExportError> {
    let json = serde_json::to_string_pretty(records)?;

    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(" * AUTO-GENERATED METADATA\n");
    out.push_str(&format!(
        " * Generated from first-page PDF scanning ({} v{})\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!(
        " * Date: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(" * Total Journals: {}\n", records.len()));
    out.push_str(" *\n");
    out.push_str(" * Fields were extracted heuristically from the first page of each PDF.\n");
    out.push_str(&format!(
        " * Records whose detectedAuthor is \"{UNDETERMINED_AUTHOR}\"\n"
    ));
    out.push_str(" * need manual review before publication.\n");
    out.push_str(" */\n\n");
    out.push_str(TS_INTERFACE);
    out.push_str("\nexport const extractedMetadata: JournalMetadata[] = ");
    out.push_str(&json);
    out.push_str(";\n\nexport default extractedMetadata;\n");
    Ok(out)
}
