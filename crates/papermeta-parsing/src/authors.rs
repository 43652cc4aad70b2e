use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::names::{is_valid_name_with_config, sanitize_name_with_config};

/// Pages with fewer normalized lines than this carry no usable author block.
pub const MIN_LINES: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").unwrap());

/// `Author:`, `Authors`, `By`, `Written by`, `Penulis:` followed by a
/// capitalized run of letters, whitespace, periods and commas.
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\b(?:authors?|written\s+by|by|penulis))[:\s]+(\p{Lu}[\p{L}\s.,]+)").unwrap()
});

/// The author-detection heuristics, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorStrategy {
    /// The line just above an email address, or the text before the email on its line.
    EmailAdjacency,
    /// A capitalized multi-word line right below the title.
    Positional,
    /// An explicit `Author:` / `By` / `Penulis:` label.
    Label,
}

impl AuthorStrategy {
    pub const ORDER: [AuthorStrategy; 3] = [
        AuthorStrategy::EmailAdjacency,
        AuthorStrategy::Positional,
        AuthorStrategy::Label,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AuthorStrategy::EmailAdjacency => "email-adjacency",
            AuthorStrategy::Positional => "positional",
            AuthorStrategy::Label => "label",
        }
    }

    /// Unvalidated candidates this strategy proposes, in the order they are tried.
    fn candidates<'a, S: AsRef<str>>(
        &self,
        window: &'a [S],
        config: &'a ParsingConfig,
    ) -> Vec<&'a str> {
        match self {
            AuthorStrategy::EmailAdjacency => email_candidates(window),
            AuthorStrategy::Positional => window
                .iter()
                .take(config.positional_lines)
                .map(|line| line.as_ref())
                .filter(|line| {
                    line.chars().next().is_some_and(char::is_uppercase)
                        && line.split_whitespace().count() >= 2
                })
                .collect(),
            AuthorStrategy::Label => {
                let label_re = config.label_re.as_ref().unwrap_or(&*LABEL_RE);
                window
                    .iter()
                    .filter_map(|line| label_re.captures(line.as_ref()))
                    .filter_map(|caps| caps.get(1))
                    .map(|m| m.as_str().trim())
                    .collect()
            }
        }
    }
}

fn email_candidates<S: AsRef<str>>(window: &[S]) -> Vec<&str> {
    let mut out = Vec::new();
    for (i, line) in window.iter().enumerate() {
        let line = line.as_ref();
        let Some(email) = EMAIL_RE.find(line) else {
            continue;
        };
        if i > 0 {
            out.push(window[i - 1].as_ref());
        }
        let before = line[..email.start()].trim();
        if !before.is_empty() {
            out.push(before);
        }
    }
    out
}

/// A detected author together with the heuristic that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorMatch {
    pub strategy: AuthorStrategy,
    /// Sanitized name.
    pub name: String,
}

/// Detect the author of a paper from the normalized lines of its first page.
///
/// Line 0 is taken as the title and skipped; the next lines form the search
/// window. Returns `None` rather than guess when no heuristic produces a
/// candidate that passes validation.
pub fn detect_author<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    detect_author_with_config(lines, &ParsingConfig::default())
}

/// Config-aware version of [`detect_author`].
pub fn detect_author_with_config<S: AsRef<str>>(
    lines: &[S],
    config: &ParsingConfig,
) -> Option<String> {
    detect_author_match(lines, config).map(|m| m.name)
}

/// Like [`detect_author_with_config`], but also reports which strategy won.
pub fn detect_author_match<S: AsRef<str>>(
    lines: &[S],
    config: &ParsingConfig,
) -> Option<AuthorMatch> {
    if lines.len() < MIN_LINES {
        return None;
    }
    let end = lines.len().min(1 + config.window_size);
    let window = &lines[1..end];

    for strategy in AuthorStrategy::ORDER {
        let found = strategy
            .candidates(window, config)
            .into_iter()
            .find(|candidate| is_valid_name_with_config(candidate, config));
        if let Some(candidate) = found {
            let name = sanitize_name_with_config(candidate, config);
            tracing::debug!(strategy = strategy.name(), candidate, %name, "author detected");
            return Some(AuthorMatch { strategy, name });
        }
    }

    tracing::debug!(window = window.len(), "no author candidate validated");
    None
}
