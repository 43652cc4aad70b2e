use crate::config::ParsingConfig;

/// Structural words that sit near the title/author block and must never be
/// mistaken for a name. Matched as case-insensitive substrings.
pub const DEFAULT_REJECT_TERMS: &[&str] = &[
    "abstract",
    "introduction",
    "university",
    "department",
    "journal",
    "volume",
    "issue",
    "copyright",
    "published",
    "keywords",
    "received",
    "accepted",
    "article",
    "paper",
    "research",
    "study",
    "analysis",
    "conclusion",
    "references",
    // Indonesian
    "abstrak",
    "pendahuluan",
    "kesimpulan",
    "daftar pustaka",
    "jurnal",
    "artikel",
    "universitas",
    // Contact block
    "corresponding",
    "email",
];

/// Footnote and affiliation markers stripped from names.
const NAME_MARKERS: &[char] = &['*', '†', '‡', '§', '¶', '#'];

/// Decide whether `candidate` is plausibly a personal-name sequence.
pub fn is_valid_name(candidate: &str) -> bool {
    is_valid_name_with_config(candidate, &ParsingConfig::default())
}

/// Config-aware version of [`is_valid_name`].
pub fn is_valid_name_with_config(candidate: &str, config: &ParsingConfig) -> bool {
    let len = candidate.chars().count();
    if len < config.min_name_chars || len > config.max_name_chars {
        return false;
    }

    let lower = candidate.to_lowercase();
    if config
        .reject_terms
        .iter()
        .any(|term| lower.contains(term.as_str()))
    {
        return false;
    }

    candidate.chars().any(char::is_alphabetic)
}

/// Strip decoration from a validated candidate and canonicalize it.
///
/// - `"Maria¹ Santos²³"` → `"Maria Santos et al."`
/// - `"J. Doe*, A. Roe†"` → `"J. Doe, A. Roe et al."`
pub fn sanitize_name(candidate: &str) -> String {
    sanitize_name_with_config(candidate, &ParsingConfig::default())
}

/// Config-aware version of [`sanitize_name`].
pub fn sanitize_name_with_config(candidate: &str, config: &ParsingConfig) -> String {
    // Markers, then every numeric char (ASCII digits and super/subscripts)
    let stripped: String = candidate
        .chars()
        .filter(|c| !NAME_MARKERS.contains(c) && !c.is_numeric())
        .collect();

    let mut name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if name.chars().count() > config.max_author_chars {
        name = name
            .chars()
            .take(config.max_author_chars)
            .collect::<String>()
            .trim()
            .to_string();
    }

    if !name.to_lowercase().contains("et al") && name.chars().count() < config.et_al_below_chars {
        name.push_str(" et al.");
    }

    name
}
