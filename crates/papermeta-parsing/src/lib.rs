use thiserror::Error;

pub mod authors;
pub mod config;
pub mod identifiers;
pub mod names;
pub mod record;
pub mod text_processing;

pub use authors::{
    AuthorMatch, AuthorStrategy, detect_author, detect_author_match, detect_author_with_config,
};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use identifiers::{document_id, extract_doi, extract_year, extract_year_with_config};
pub use names::{
    is_valid_name, is_valid_name_with_config, sanitize_name, sanitize_name_with_config,
};
pub use record::{ExtractedFields, RecordOptions, SourceFile, assemble_record, extract_fields};
pub use text_processing::normalize_lines;
// Re-export domain types from core (canonical definitions live there)
pub use papermeta_core::{MetadataRecord, ReviewStatus};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("year range is empty: {min} > {max}")]
    EmptyYearRange { min: u32, max: u32 },
    #[error("author search window must contain at least one line")]
    EmptyWindow,
}
