use once_cell::sync::Lazy;
use regex::Regex;

use papermeta_core::ID_PREFIX;

use crate::config::ParsingConfig;
use crate::text_processing::char_prefix;

/// Number of hex digits of the MD5 digest kept in a document id.
pub const ID_HEX_LEN: usize = 12;

/// Extract a DOI-labeled identifier from page text.
///
/// Only DOIs introduced by a `DOI` label (any case, optional colon) are taken:
/// - `DOI: 10.1234/abcd.5678`
/// - `doi 10.1016/j.energy.2021.120000`
///
/// The token runs to the next whitespace and is returned as captured, so
/// punctuation glued to it stays. Returns `None` when no labeled DOI exists.
pub fn extract_doi(text: &str) -> Option<String> {
    static DOI_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)doi[:\s]*(10\.\d{4,}/\S+)").unwrap());

    let caps = DOI_RE.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Extract the publication year from the start of the page text.
///
/// Only the first 1000 characters are scanned. Among four-digit years in
/// 2015–2025, the most frequent wins; ties go to the year seen first.
pub fn extract_year(text: &str) -> Option<String> {
    extract_year_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_year`].
pub fn extract_year_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

    let sample = char_prefix(text, config.year_scan_chars);

    // (year, count) in first-seen order
    let mut counts: Vec<(u32, usize)> = Vec::new();
    for caps in YEAR_RE.captures_iter(sample) {
        let Ok(year) = caps[1].parse::<u32>() else {
            continue;
        };
        if !config.year_range.contains(&year) {
            continue;
        }
        match counts.iter_mut().find(|(y, _)| *y == year) {
            Some((_, n)) => *n += 1,
            None => counts.push((year, 1)),
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for (year, n) in counts {
        if best.is_none_or(|(_, best_n)| n > best_n) {
            best = Some((year, n));
        }
    }
    best.map(|(year, _)| year.to_string())
}

/// Deterministic document identifier: `journal-` + the first 12 hex digits
/// of the MD5 digest of the filename.
///
/// Downstream stores persist these ids; the digest and length must not change.
pub fn document_id(filename: &str) -> String {
    let digest = format!("{:x}", md5::compute(filename.as_bytes()));
    format!("{}{}", ID_PREFIX, &digest[..ID_HEX_LEN])
}
