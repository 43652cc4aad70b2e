//! Integration tests for [`process_folder`] driven by a scripted
//! [`PdfBackend`], so no real PDFs or MuPDF are needed.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use papermeta_core::UNDETERMINED_AUTHOR;
use papermeta_ingest::{BackendError, BatchConfig, PdfBackend, ProgressEvent, process_folder};

enum Page {
    Text(&'static str),
    Fail,
    Hang(Duration),
}

/// Answers by filename; unknown files fail to open.
struct ScriptedBackend {
    pages: HashMap<&'static str, Page>,
}

impl PdfBackend for ScriptedBackend {
    fn first_page_text(&self, path: &Path) -> Result<String, BackendError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match self.pages.get(name) {
            Some(Page::Text(text)) => Ok(text.to_string()),
            Some(Page::Hang(delay)) => {
                std::thread::sleep(*delay);
                Ok("Late Title\nLate Author\nlate@example.org".to_string())
            }
            Some(Page::Fail) | None => Err(BackendError::OpenError("corrupt xref table".into())),
        }
    }
}

const WITH_AUTHOR: &str = "\
Solar Adoption in Rural Java
Dewi Lestari, Agus Salim
dewi@ugm.ac.id
Published 2022. DOI: 10.5555/solar.2022.01
";

const WITHOUT_AUTHOR: &str = "\
A Survey of Grid Storage
volume 4 issue 2
abstract: we review 2019 storage work
";

fn scratch_folder(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        std::fs::write(dir.path().join(name), vec![0u8; 2048]).unwrap();
    }
    dir
}

fn config(dir: &Path) -> BatchConfig {
    BatchConfig {
        upload_date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        timeout: Duration::from_secs(5),
        ..BatchConfig::new(dir)
    }
}

fn backend(pages: Vec<(&'static str, Page)>) -> Arc<dyn PdfBackend> {
    Arc::new(ScriptedBackend {
        pages: pages.into_iter().collect(),
    })
}

#[tokio::test]
async fn one_record_per_document_in_filename_order() {
    let dir = scratch_folder(&["c.pdf", "a.pdf", "b.PDF", "readme.md"]);
    let backend = backend(vec![
        ("a.pdf", Page::Text(WITH_AUTHOR)),
        ("b.PDF", Page::Text(WITHOUT_AUTHOR)),
        ("c.pdf", Page::Fail),
    ]);

    let result = process_folder(&config(dir.path()), backend, |_| {})
        .await
        .unwrap();

    let names: Vec<&str> = result.records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.PDF", "c.pdf"]);

    let a = &result.records[0];
    assert_eq!(a.detected_author, "Dewi Lestari, Agus Salim et al.");
    assert_eq!(a.publication_year.as_deref(), Some("2022"));
    assert_eq!(a.doi.as_deref(), Some("10.5555/solar.2022.01"));
    assert_eq!(a.upload_date, "2024-05-17");
    assert_eq!(a.file_size, "0.00 MB");
    assert!(a.content_preview.is_some());

    let b = &result.records[1];
    assert_eq!(b.detected_author, UNDETERMINED_AUTHOR);
    assert_eq!(b.publication_year.as_deref(), Some("2019"));
    assert!(b.content_preview.is_some());

    let c = &result.records[2];
    assert_eq!(c.detected_author, UNDETERMINED_AUTHOR);
    assert_eq!(c.publication_year, None);
    assert_eq!(c.content_preview, None);

    assert_eq!(result.stats.total, 3);
    assert_eq!(result.stats.succeeded, 1);
    assert_eq!(result.stats.failed, 2);
    assert_eq!(result.stats.read_failures, 1);
    assert_eq!(result.stats.undetermined(), 1);
}

#[tokio::test]
async fn slow_backend_times_out_as_read_failure() {
    let dir = scratch_folder(&["slow.pdf", "fast.pdf"]);
    let backend = backend(vec![
        ("slow.pdf", Page::Hang(Duration::from_millis(500))),
        ("fast.pdf", Page::Text(WITH_AUTHOR)),
    ]);
    let config = BatchConfig {
        timeout: Duration::from_millis(50),
        ..config(dir.path())
    };

    let events = Mutex::new(Vec::new());
    let result = process_folder(&config, backend, |event| {
        if let ProgressEvent::ReadFailed { filename, message, .. } = event {
            events.lock().unwrap().push((filename, message));
        }
    })
    .await
    .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.read_failures, 1);
    assert_eq!(result.records[1].filename, "slow.pdf");
    assert_eq!(result.records[1].detected_author, UNDETERMINED_AUTHOR);

    let events = events.into_inner().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "slow.pdf");
    assert!(events[0].1.contains("timed out"), "{}", events[0].1);
}

#[tokio::test]
async fn blank_page_counts_as_read_failure() {
    let dir = scratch_folder(&["scan.pdf"]);
    let backend = backend(vec![("scan.pdf", Page::Text("  \n\n \t"))]);

    let result = process_folder(&config(dir.path()), backend, |_| {})
        .await
        .unwrap();

    assert_eq!(result.stats.read_failures, 1);
    assert_eq!(result.records[0].content_preview, None);
}

#[tokio::test]
async fn progress_events_follow_document_order() {
    let dir = scratch_folder(&["b.pdf", "a.pdf"]);
    let backend = backend(vec![
        ("a.pdf", Page::Text(WITH_AUTHOR)),
        ("b.pdf", Page::Fail),
    ]);

    let log = Mutex::new(Vec::new());
    process_folder(&config(dir.path()), backend, |event| {
        let line = match event {
            ProgressEvent::Started { total, .. } => format!("start {total}"),
            ProgressEvent::Processing { index, filename, .. } => format!("proc {index} {filename}"),
            ProgressEvent::Extracted { index, record, .. } => {
                format!("ok {index} {}", record.filename)
            }
            ProgressEvent::ReadFailed { index, filename, .. } => format!("fail {index} {filename}"),
        };
        log.lock().unwrap().push(line);
    })
    .await
    .unwrap();

    assert_eq!(
        log.into_inner().unwrap(),
        vec![
            "start 2",
            "proc 0 a.pdf",
            "ok 0 a.pdf",
            "proc 1 b.pdf",
            "fail 1 b.pdf",
        ]
    );
}

#[tokio::test]
async fn missing_folder_yields_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend(vec![]);

    let result = process_folder(&config(&dir.path().join("absent")), backend, |_| {})
        .await
        .unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats.total, 0);
    assert_eq!(result.stats.success_rate(), 0.0);
}

#[tokio::test]
async fn repeated_runs_produce_identical_records() {
    let dir = scratch_folder(&["paper.pdf", "blank.pdf"]);
    let pages = || {
        backend(vec![
            ("paper.pdf", Page::Text(WITH_AUTHOR)),
            ("blank.pdf", Page::Text(WITHOUT_AUTHOR)),
        ])
    };

    let first = process_folder(&config(dir.path()), pages(), |_| {})
        .await
        .unwrap();
    let second = process_folder(&config(dir.path()), pages(), |_| {})
        .await
        .unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.records[1].id, papermeta_parsing::document_id("paper.pdf"));
}
