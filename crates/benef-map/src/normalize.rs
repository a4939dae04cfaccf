//! Text normalization for header comparison.

/// Zero-width space, non-joiner, joiner and the byte-order mark.
pub fn is_zero_width(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Strict form: zero-width characters and all whitespace removed, upper-cased.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !is_zero_width(*ch) && !ch.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Trimmed and upper-cased, otherwise untouched.
pub fn upper_trimmed(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Upper-cased with every whitespace character removed.
pub fn without_whitespace(raw: &str) -> String {
    upper_trimmed(raw)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Upper-cased with whitespace, `_` and `-` removed.
pub fn without_separators(raw: &str) -> String {
    upper_trimmed(raw)
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .collect()
}
