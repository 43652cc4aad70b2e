use chrono::NaiveDate;
use papermeta_core::{
    INSTITUTION_NOT_SPECIFIED, JOURNAL_SOURCE_UNKNOWN, MetadataRecord, ReviewStatus,
    UNDETERMINED_AUTHOR,
};
use papermeta_reporting::{ExportFormat, export_records};

fn records() -> Vec<MetadataRecord> {
    let base = MetadataRecord {
        id: "journal-5d41402abc4b".into(),
        filename: "hydrogen-storage.pdf".into(),
        title: "hydrogen-storage".into(),
        uploader: "Kontributor (System)".into(),
        detected_author: "Rina Wulandari et al.".into(),
        author_institution: INSTITUTION_NOT_SPECIFIED.into(),
        publication_year: Some("2023".into()),
        journal_source: JOURNAL_SOURCE_UNKNOWN.into(),
        doi: Some("10.1016/j.ijhydene.2023.01.001".into()),
        pdf_url: "./data_jurnal/hydrogen-storage.pdf".into(),
        upload_date: "2024-05-17".into(),
        status: ReviewStatus::Pending,
        file_size: "2.31 MB".into(),
        content_preview: Some("Hydrogen Storage in Metal Hydrides\nRina Wulandari".into()),
    };
    let unread = MetadataRecord {
        id: "journal-7d793037a076".into(),
        filename: "scan-only.pdf".into(),
        title: "scan-only".into(),
        detected_author: UNDETERMINED_AUTHOR.into(),
        publication_year: None,
        doi: None,
        pdf_url: "./data_jurnal/scan-only.pdf".into(),
        file_size: "0.40 MB".into(),
        content_preview: None,
        ..base.clone()
    };
    vec![base, unread]
}

/// The array literal between the `=` of the named export and its `;`.
fn typescript_array(module: &str) -> &str {
    let start = module
        .find("JournalMetadata[] = ")
        .expect("named export present")
        + "JournalMetadata[] = ".len();
    let end = module
        .rfind(";\n\nexport default extractedMetadata;")
        .expect("default export present");
    &module[start..end]
}

#[test]
fn both_artifacts_carry_the_same_records() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("journals_metadata.json");
    let ts_path = dir.path().join("src").join("lib").join("journals_metadata.ts");
    let generated_at = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let records = records();
    for format in ExportFormat::all() {
        let path = match format {
            ExportFormat::Json => &json_path,
            ExportFormat::TypeScript => &ts_path,
        };
        export_records(&records, *format, path, generated_at).unwrap();
    }

    let json = std::fs::read_to_string(&json_path).unwrap();
    let from_json: Vec<MetadataRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, records);

    let module = std::fs::read_to_string(&ts_path).unwrap();
    let from_ts: Vec<MetadataRecord> = serde_json::from_str(typescript_array(&module)).unwrap();
    assert_eq!(from_ts, records);
    assert_eq!(typescript_array(&module), json.trim_end());
}

#[test]
fn empty_batch_still_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let generated_at = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let json_path = dir.path().join("out.json");
    let ts_path = dir.path().join("nested").join("out.ts");
    export_records(&[], ExportFormat::Json, &json_path, generated_at).unwrap();
    export_records(&[], ExportFormat::TypeScript, &ts_path, generated_at).unwrap();

    assert_eq!(std::fs::read_to_string(&json_path).unwrap(), "[]\n");
    let module = std::fs::read_to_string(&ts_path).unwrap();
    assert_eq!(typescript_array(&module), "[]");
}

#[test]
fn unwritable_target_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where a parent directory is expected
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let generated_at = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let err = export_records(
        &records(),
        ExportFormat::Json,
        &blocker.join("out.json"),
        generated_at,
    )
    .unwrap_err();
    assert!(matches!(err, papermeta_reporting::ExportError::Io { .. }));
}
