use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use papermeta_core::{BatchStats, MetadataRecord, ProgressEvent};

const RULE_WIDTH: usize = 80;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn rule(w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))
}

/// Print the run banner.
pub fn print_banner(w: &mut dyn Write, folder: &Path, color: ColorMode) -> std::io::Result<()> {
    rule(w)?;
    let title = format!("PAPERMETA v{}", env!("CARGO_PKG_VERSION"));
    if color.enabled() {
        writeln!(w, "{}", title.bold().cyan())?;
    } else {
        writeln!(w, "{}", title)?;
    }
    writeln!(w, "First-page heuristics: author, year, DOI. Unsure results are left for review.")?;
    writeln!(w, "Folder: {}", folder.display())?;
    rule(w)?;
    Ok(())
}

/// Report an input folder that does not exist or holds no PDFs.
pub fn print_no_documents(w: &mut dyn Write, folder: &Path, color: ColorMode) -> std::io::Result<()> {
    let msg = if folder.is_dir() {
        format!("No PDF files found in '{}'", folder.display())
    } else {
        format!("Input folder '{}' does not exist", folder.display())
    };
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

/// Print a real-time progress event.
pub fn print_progress(
    w: &mut dyn Write,
    event: &ProgressEvent,
    color: ColorMode,
) -> std::io::Result<()> {
    match event {
        ProgressEvent::Started { total, .. } => {
            writeln!(w, "Found {} PDF file(s)", total)?;
        }
        ProgressEvent::Processing {
            index,
            total,
            filename,
        } => {
            writeln!(w)?;
            if color.enabled() {
                writeln!(w, "[{}/{}] {}", index + 1, total, filename.bold())?;
            } else {
                writeln!(w, "[{}/{}] {}", index + 1, total, filename)?;
            }
        }
        ProgressEvent::Extracted { record, .. } => {
            print_record_fields(w, record, color)?;
        }
        ProgressEvent::ReadFailed { message, .. } => {
            if color.enabled() {
                writeln!(w, "   {} could not read PDF", "FAIL".red())?;
                writeln!(w, "        {}", message.dimmed())?;
            } else {
                writeln!(w, "   FAIL could not read PDF")?;
                writeln!(w, "        {}", message)?;
            }
        }
    }
    Ok(())
}

fn print_record_fields(
    w: &mut dyn Write,
    record: &MetadataRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    if record.has_detected_author() {
        if color.enabled() {
            writeln!(w, "   {} Author: {}", "OK".green(), record.detected_author)?;
        } else {
            writeln!(w, "   OK Author: {}", record.detected_author)?;
        }
    } else if color.enabled() {
        writeln!(
            w,
            "   {} Author: not detected (needs manual review)",
            "WARN".yellow()
        )?;
    } else {
        writeln!(w, "   WARN Author: not detected (needs manual review)")?;
    }

    if let Some(year) = &record.publication_year {
        writeln!(w, "   Year: {}", year)?;
    }
    if let Some(doi) = &record.doi {
        writeln!(w, "   DOI: {}", doi)?;
    }
    Ok(())
}

/// Print the full record list for `--dry-run`.
pub fn print_dry_run(
    w: &mut dyn Write,
    records: &[MetadataRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "DRY RUN: no files written".bold().cyan())?;
    } else {
        writeln!(w, "DRY RUN: no files written")?;
    }
    for record in records {
        writeln!(w)?;
        writeln!(w, "{}  {}", record.id, record.filename)?;
        writeln!(w, "   title:  {}", record.title)?;
        writeln!(w, "   author: {}", record.detected_author)?;
        writeln!(
            w,
            "   year:   {}",
            record.publication_year.as_deref().unwrap_or("-")
        )?;
        writeln!(w, "   doi:    {}", record.doi.as_deref().unwrap_or("-"))?;
        writeln!(w, "   size:   {}", record.file_size)?;
    }
    Ok(())
}

/// Print the batch summary.
pub fn print_summary(w: &mut dyn Write, stats: &BatchStats, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    rule(w)?;
    writeln!(w, "SCAN RESULTS")?;
    if color.enabled() {
        writeln!(w, "  Authors detected:     {}", stats.succeeded.green())?;
        writeln!(w, "  Authors not detected: {}", stats.failed.yellow())?;
    } else {
        writeln!(w, "  Authors detected:     {}", stats.succeeded)?;
        writeln!(w, "  Authors not detected: {}", stats.failed)?;
    }
    if stats.read_failures > 0 {
        writeln!(w, "    (unreadable PDFs:   {})", stats.read_failures)?;
    }
    writeln!(w, "  Total files:          {}", stats.total)?;
    writeln!(w, "  Success rate:         {:.1}%", stats.success_rate())?;
    Ok(())
}

/// Print where an artifact was written.
pub fn print_written(
    w: &mut dyn Write,
    label: &str,
    path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if color.enabled() {
        writeln!(w, "{} saved to {}", label, shown.display().bold())?;
    } else {
        writeln!(w, "{} saved to {}", label, shown.display())?;
    }
    Ok(())
}

/// Print follow-up guidance after a successful run.
pub fn print_next_steps(w: &mut dyn Write, json_path: &Path) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Next steps:")?;
    writeln!(w, "  1. Review '{}' for the extracted fields", json_path.display())?;
    writeln!(
        w,
        "  2. Import into the dashboard: import metadata from '@/lib/journals_metadata'"
    )?;
    writeln!(
        w,
        "  3. Records without a detected author are flagged for manual review"
    )?;
    writeln!(w, "  4. Approve or reject each record after review")?;
    rule(w)?;
    Ok(())
}
