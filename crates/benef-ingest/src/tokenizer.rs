//! Delimited-text tokenizer with separator detection.
//!
//! The input is messy spreadsheet output: either separator, stray
//! whitespace, zero-width characters and quoted fields. Output is purely
//! strings; no header or type inference happens here.

use benef_map::is_zero_width;
use benef_model::{Row, Separator, Table};
use tracing::debug;

/// Picks the field separator from the first line of `text`.
///
/// Counts commas and semicolons outside quotes. Semicolon is chosen only when
/// it strictly outnumbers comma; comma is the default.
pub fn detect_separator(text: &str) -> Separator {
    let first_line = text.lines().next().unwrap_or("");
    let mut commas = 0usize;
    let mut semicolons = 0usize;
    let mut in_quotes = false;
    let mut chars = first_line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }
    if semicolons > commas {
        Separator::Semicolon
    } else {
        Separator::Comma
    }
}

/// Splits one line into cleaned fields.
///
/// A `""` inside an open quote emits a literal `"`; any other quote toggles
/// the quoted state and is not kept. The separator outside quotes ends a
/// field.
pub fn parse_line(line: &str, separator: Separator) -> Row {
    let separator = separator.as_char();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if ch == separator && !in_quotes {
            cells.push(clean_field(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }
    cells.push(clean_field(&current));
    Row::new(cells)
}

/// Trims whitespace and zero-width characters at both ends, then drops one
/// leading and one trailing literal quote.
pub fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim_matches(|ch: char| ch.is_whitespace() || is_zero_width(ch));
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Tokenizes `text` into a [`Table`].
///
/// Lines end at `\n` or `\r\n`. Blank lines are dropped, as are rows whose
/// every field is blank after cleaning.
pub fn parse(text: &str) -> Table {
    let separator = detect_separator(text);
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_line(line, separator);
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }
    debug!(
        separator = %separator,
        rows = rows.len(),
        skipped_blank_rows = skipped,
        "tokenized delimited text"
    );
    Table::new(separator, rows)
}
