use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use papermeta_core::config_file::ConfigFile;
use papermeta_core::{
    DEFAULT_EXTRACTION_TIMEOUT_SECS, DEFAULT_INPUT_FOLDER, DEFAULT_JSON_OUTPUT,
    DEFAULT_PDF_BASE_URL, DEFAULT_TYPESCRIPT_OUTPUT, DEFAULT_UPLOADER,
};
use papermeta_ingest::BatchConfig;
use papermeta_parsing::{ParsingConfig, ParsingConfigBuilder, RecordOptions};

/// Values given on the command line; `None` falls through to env, file, default.
#[derive(Debug, Default)]
pub struct Overrides {
    pub folder: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
    pub ts_out: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub pdf_base_url: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub json_path: PathBuf,
    pub typescript_path: PathBuf,
    pub timeout: Duration,
    pub record: RecordOptions,
    pub parsing: ParsingConfig,
    pub header_exclusion: f32,
    pub footer_exclusion: f32,
}

impl Settings {
    /// Resolve every setting: CLI flag > env var > config file > default.
    ///
    /// `env` looks up an environment variable by name.
    pub fn resolve(
        cli: Overrides,
        env: impl Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> anyhow::Result<Self> {
        let input = file.input.unwrap_or_default();
        let output = file.output.unwrap_or_default();
        let extraction = file.extraction.unwrap_or_default();
        let parsing = file.parsing.unwrap_or_default();

        let input_dir = cli
            .folder
            .or_else(|| env("PAPERMETA_INPUT").map(PathBuf::from))
            .or_else(|| input.folder.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FOLDER));

        let timeout_secs = cli
            .timeout_secs
            .or_else(|| env("PAPERMETA_TIMEOUT").and_then(|v| v.trim().parse().ok()))
            .or(extraction.timeout_secs)
            .unwrap_or(DEFAULT_EXTRACTION_TIMEOUT_SECS);
        if timeout_secs == 0 {
            anyhow::bail!("extraction timeout must be at least 1 second");
        }

        let json_path = cli
            .json_out
            .or_else(|| output.json_path.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JSON_OUTPUT));
        let typescript_path = cli
            .ts_out
            .or_else(|| output.typescript_path.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TYPESCRIPT_OUTPUT));

        let record = RecordOptions {
            uploader: output
                .uploader
                .unwrap_or_else(|| DEFAULT_UPLOADER.to_string()),
            pdf_base_url: cli
                .pdf_base_url
                .or(output.pdf_base_url)
                .unwrap_or_else(|| DEFAULT_PDF_BASE_URL.to_string()),
        };

        let mut builder = ParsingConfigBuilder::new();
        for term in parsing.extra_reject_terms.unwrap_or_default() {
            builder = builder.add_reject_term(term);
        }
        if let Some(min) = parsing.year_min {
            builder = builder.year_min(min);
        }
        if let Some(max) = parsing.year_max {
            builder = builder.year_max(max);
        }
        let parsing = builder
            .build()
            .context("invalid [parsing] section in config file")?;

        Ok(Self {
            input_dir,
            json_path,
            typescript_path,
            timeout: Duration::from_secs(timeout_secs),
            record,
            parsing,
            header_exclusion: extraction.header_exclusion.unwrap_or(0.0),
            footer_exclusion: extraction.footer_exclusion.unwrap_or(0.0),
        })
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            input_dir: self.input_dir.clone(),
            record: self.record.clone(),
            parsing: self.parsing.clone(),
            timeout: self.timeout,
            ..BatchConfig::default()
        }
    }
}
