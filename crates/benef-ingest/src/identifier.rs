//! Join-key canonicalization.

/// Keeps only the ASCII decimal digits of `raw`.
///
/// Check digits are not validated. An empty result never matches anything.
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
