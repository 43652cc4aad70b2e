use std::path::Path;

use mupdf::{Document, TextPageFlags};

use papermeta_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the only one linking mupdf (AGPL-3.0); builds without the
/// `pdf` feature of `papermeta-ingest` never pull it in.
///
/// Header and footer exclusion are off by default: journal banners above the
/// title often carry the DOI and volume year, which the extractors need.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend {
    /// Fraction of page height from the bottom to drop as footer (0.0–1.0).
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from the top to drop as header (0.0–1.0).
    header_exclusion_ratio: Option<f32>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = (ratio > 0.0).then_some(ratio.min(1.0));
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = (ratio > 0.0).then_some(ratio.min(1.0));
        self
    }
}

fn extraction_error(e: mupdf::Error) -> BackendError {
    BackendError::ExtractionError(e.to_string())
}

impl PdfBackend for MupdfBackend {
    fn first_page_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let page = document
            .pages()
            .map_err(extraction_error)?
            .next()
            .ok_or(BackendError::NoPages)?
            .map_err(extraction_error)?;

        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(extraction_error)?;

        let bounds = page.bounds().map_err(extraction_error)?;
        let height = bounds.y1 - bounds.y0;
        let header_threshold = self.header_exclusion_ratio.map(|r| bounds.y0 + height * r);
        let footer_threshold = self.footer_exclusion_ratio.map(|r| bounds.y1 - height * r);

        // Block/line order, one text line per output line
        let mut text = String::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();
            if header_threshold.is_some_and(|t| block_bounds.y1 <= t) {
                continue;
            }
            if footer_threshold.is_some_and(|t| block_bounds.y0 >= t) {
                continue;
            }

            for line in block.lines() {
                text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                text.push('\n');
            }
        }

        tracing::trace!(path = %path.display(), chars = text.len(), "first page extracted");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_defaults_off() {
        let backend = MupdfBackend::new();
        assert_eq!(backend.header_exclusion_ratio, None);
        assert_eq!(backend.footer_exclusion_ratio, None);
    }

    #[test]
    fn test_exclusion_setters() {
        let backend = MupdfBackend::new()
            .with_header_exclusion(0.04)
            .with_footer_exclusion(1.5);
        assert_eq!(backend.header_exclusion_ratio, Some(0.04));
        assert_eq!(backend.footer_exclusion_ratio, Some(1.0));

        let backend = backend.with_header_exclusion(0.0);
        assert_eq!(backend.header_exclusion_ratio, None);
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = MupdfBackend::new()
            .first_page_text(Path::new("/nonexistent/papermeta/missing.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }
}
