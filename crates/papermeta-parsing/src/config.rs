use std::ops::RangeInclusive;

use regex::Regex;

use crate::ParsingError;
use crate::names::DEFAULT_REJECT_TERMS;

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Tunables for the first-page metadata heuristics.
///
/// The defaults are the documented behavior; use [`ParsingConfigBuilder`]
/// to adjust them.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── authors.rs ──
    /// Lines searched after the title line (default: 9).
    pub(crate) window_size: usize,
    /// Leading window lines examined by the positional strategy (default: 3).
    pub(crate) positional_lines: usize,
    /// Custom label regex; group 1 must capture the name. `None` = built-in.
    pub(crate) label_re: Option<Regex>,

    // ── names.rs ──
    /// Lowercased reject terms, resolved from the defaults.
    pub(crate) reject_terms: Vec<String>,
    pub(crate) min_name_chars: usize,
    pub(crate) max_name_chars: usize,
    /// Sanitized names are cut to this many characters (default: 60).
    pub(crate) max_author_chars: usize,
    /// Names shorter than this get an " et al." suffix (default: 50).
    pub(crate) et_al_below_chars: usize,

    // ── identifiers.rs ──
    /// Leading characters of the page text scanned for years (default: 1000).
    pub(crate) year_scan_chars: usize,
    pub(crate) year_range: RangeInclusive<u32>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            window_size: 9,
            positional_lines: 3,
            label_re: None,
            reject_terms: DEFAULT_REJECT_TERMS.iter().map(|s| s.to_string()).collect(),
            min_name_chars: 5,
            max_name_chars: 100,
            max_author_chars: 60,
            et_al_below_chars: 50,
            year_scan_chars: 1000,
            year_range: 2015..=2025,
        }
    }
}

impl ParsingConfig {
    pub fn year_range(&self) -> &RangeInclusive<u32> {
        &self.year_range
    }

    pub fn reject_terms(&self) -> &[String] {
        &self.reject_terms
    }
}

/// Builder for [`ParsingConfig`].
///
/// Fails fast in [`build()`](Self::build) on an invalid label pattern or an
/// empty year range.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    window_size: Option<usize>,
    positional_lines: Option<usize>,
    label_re: Option<String>,
    reject_terms: ListOverride<String>,
    year_scan_chars: Option<usize>,
    year_min: Option<u32>,
    year_max: Option<u32>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_size(mut self, lines: usize) -> Self {
        self.window_size = Some(lines);
        self
    }

    pub fn positional_lines(mut self, lines: usize) -> Self {
        self.positional_lines = Some(lines);
        self
    }

    pub fn label_regex(mut self, pattern: &str) -> Self {
        self.label_re = Some(pattern.to_string());
        self
    }

    // ── Reject terms ──

    pub fn set_reject_terms(mut self, terms: Vec<String>) -> Self {
        self.reject_terms = ListOverride::Replace(terms);
        self
    }

    pub fn add_reject_term(mut self, term: String) -> Self {
        match &mut self.reject_terms {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(term),
            ListOverride::Default => self.reject_terms = ListOverride::Extend(vec![term]),
        }
        self
    }

    // ── Years ──

    pub fn year_scan_chars(mut self, chars: usize) -> Self {
        self.year_scan_chars = Some(chars);
        self
    }

    pub fn year_min(mut self, year: u32) -> Self {
        self.year_min = Some(year);
        self
    }

    pub fn year_max(mut self, year: u32) -> Self {
        self.year_max = Some(year);
        self
    }

    pub fn build(self) -> Result<ParsingConfig, ParsingError> {
        let defaults = ParsingConfig::default();

        let window_size = self.window_size.unwrap_or(defaults.window_size);
        if window_size == 0 {
            return Err(ParsingError::EmptyWindow);
        }

        let min = self.year_min.unwrap_or(*defaults.year_range.start());
        let max = self.year_max.unwrap_or(*defaults.year_range.end());
        if min > max {
            return Err(ParsingError::EmptyYearRange { min, max });
        }

        let default_terms: Vec<String> =
            DEFAULT_REJECT_TERMS.iter().map(|s| s.to_string()).collect();
        let reject_terms = self
            .reject_terms
            .resolve(&default_terms)
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(ParsingConfig {
            window_size,
            positional_lines: self.positional_lines.unwrap_or(defaults.positional_lines),
            label_re: self.label_re.map(|p| Regex::new(&p)).transpose()?,
            reject_terms,
            year_scan_chars: self.year_scan_chars.unwrap_or(defaults.year_scan_chars),
            year_range: min..=max,
            ..defaults
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.window_size, 9);
        assert_eq!(config.positional_lines, 3);
        assert_eq!(config.year_range, 2015..=2025);
        assert!(config.reject_terms.iter().any(|t| t == "abstract"));
    }

    #[test]
    fn test_builder_extends_reject_terms() {
        let config = ParsingConfigBuilder::new()
            .add_reject_term("Editor".to_string())
            .build()
            .unwrap();
        assert!(config.reject_terms.iter().any(|t| t == "editor"));
        assert!(config.reject_terms.iter().any(|t| t == "abstract"));
    }

    #[test]
    fn test_builder_replaces_reject_terms() {
        let config = ParsingConfigBuilder::new()
            .set_reject_terms(vec!["only".to_string()])
            .build()
            .unwrap();
        assert_eq!(config.reject_terms, vec!["only".to_string()]);
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new().label_regex(r"[invalid").build();
        assert!(matches!(result, Err(ParsingError::Regex(_))));
    }

    #[test]
    fn test_builder_rejects_inverted_year_range() {
        let result = ParsingConfigBuilder::new().year_min(2030).year_max(2020).build();
        assert!(matches!(
            result,
            Err(ParsingError::EmptyYearRange {
                min: 2030,
                max: 2020
            })
        ));
    }

    #[test]
    fn test_builder_rejects_empty_window() {
        let result = ParsingConfigBuilder::new().window_size(0).build();
        assert!(matches!(result, Err(ParsingError::EmptyWindow)));
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(e.resolve(&defaults).len(), 3);
    }
}
