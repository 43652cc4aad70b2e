use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub extraction: Option<ExtractionConfig>,
    pub parsing: Option<ParsingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_path: Option<String>,
    pub typescript_path: Option<String>,
    pub pdf_base_url: Option<String>,
    pub uploader: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub timeout_secs: Option<u64>,
    pub header_exclusion: Option<f32>,
    pub footer_exclusion: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingSection {
    pub extra_reject_terms: Option<Vec<String>>,
    pub year_min: Option<u32>,
    pub year_max: Option<u32>,
}

/// Platform config directory path: `<config_dir>/papermeta/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papermeta").join("config.toml"))
}

/// Load config by cascading CWD `.papermeta.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".papermeta.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        input: Some(InputConfig {
            folder: overlay
                .input
                .as_ref()
                .and_then(|i| i.folder.clone())
                .or_else(|| base.input.as_ref().and_then(|i| i.folder.clone())),
        }),
        output: Some(OutputConfig {
            json_path: overlay
                .output
                .as_ref()
                .and_then(|o| o.json_path.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.json_path.clone())),
            typescript_path: overlay
                .output
                .as_ref()
                .and_then(|o| o.typescript_path.clone())
                .or_else(|| {
                    base.output
                        .as_ref()
                        .and_then(|o| o.typescript_path.clone())
                }),
            pdf_base_url: overlay
                .output
                .as_ref()
                .and_then(|o| o.pdf_base_url.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.pdf_base_url.clone())),
            uploader: overlay
                .output
                .as_ref()
                .and_then(|o| o.uploader.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.uploader.clone())),
        }),
        extraction: Some(ExtractionConfig {
            timeout_secs: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.timeout_secs)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.timeout_secs)),
            header_exclusion: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.header_exclusion)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.header_exclusion)),
            footer_exclusion: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.footer_exclusion)
                .or_else(|| base.extraction.as_ref().and_then(|e| e.footer_exclusion)),
        }),
        parsing: Some(ParsingSection {
            extra_reject_terms: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.extra_reject_terms.clone())
                .or_else(|| {
                    base.parsing
                        .as_ref()
                        .and_then(|p| p.extra_reject_terms.clone())
                }),
            year_min: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.year_min)
                .or_else(|| base.parsing.as_ref().and_then(|p| p.year_min)),
            year_max: overlay
                .parsing
                .as_ref()
                .and_then(|p| p.year_max)
                .or_else(|| base.parsing.as_ref().and_then(|p| p.year_max)),
        }),
    }
}
