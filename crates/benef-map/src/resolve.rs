//! Header resolution against ordered [`ColumnSpec`] rules.

use benef_model::{ColumnNames, ResolvedColumns, Row};
use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use tracing::debug;

use crate::normalize::without_separators;
use crate::rules::{ColumnSpec, RuleKind};

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Where a logical column was found and which rule found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMatch {
    pub index: usize,
    pub rule: RuleKind,
}

/// Locates `spec` in `header`.
///
/// Rules are tried in order; within a rule the leftmost matching cell wins
/// unless the rule prefers the last one.
/// Returns `None` when no rule matches any cell.
pub fn resolve_column(header: &Row, spec: &ColumnSpec) -> Option<ColumnMatch> {
    for rule in &spec.rules {
        let found = if rule.prefers_last() {
            header
                .iter()
                .rposition(|cell| rule.matches(cell, &spec.name))
        } else {
            header
                .iter()
                .position(|cell| rule.matches(cell, &spec.name))
        };
        if let Some(index) = found {
            let kind = rule.kind();
            if kind != RuleKind::Exact {
                debug!(
                    column = %spec.name,
                    header = %header.cell(index),
                    index,
                    rule = %kind,
                    "column resolved by fallback rule"
                );
            }
            return Some(ColumnMatch { index, rule: kind });
        }
    }
    None
}

/// Closest header label to `name`, when one is similar enough to be a likely typo.
pub fn suggest_column(header: &Row, name: &str) -> Option<String> {
    let target = without_separators(name);
    if target.is_empty() {
        return None;
    }
    header
        .iter()
        .filter(|cell| !cell.trim().is_empty())
        .map(|cell| {
            let score = jaro_similarity(without_separators(cell).chars(), target.chars());
            (cell, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .fold(None::<(&String, f64)>, |best, candidate| match best {
            Some((_, best_score)) if best_score >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(cell, _)| cell.trim().to_string())
}

/// Resolves the identifier, verdict and notes columns of a sheet header.
///
/// Returns `None` only when the identifier column is missing; verdict and
/// notes are optional.
pub fn resolve_sheet_columns(header: &Row, names: &ColumnNames) -> Option<ResolvedColumns> {
    let identifier = resolve_column(header, &ColumnSpec::identifier(&names.sheet_identifier))?;
    let verdict = resolve_column(header, &ColumnSpec::verdict(&names.verdict));
    let notes = resolve_column(header, &ColumnSpec::notes(&names.notes));
    Some(ResolvedColumns {
        identifier: identifier.index,
        verdict: verdict.map(|m| m.index),
        notes: notes.map(|m| m.index),
    })
}

/// Resolves the identifier column of a CSV header.
pub fn resolve_csv_columns(header: &Row, identifier_column: &str) -> Option<ResolvedColumns> {
    resolve_column(header, &ColumnSpec::identifier(identifier_column)).map(|found| {
        ResolvedColumns {
            identifier: found.index,
            verdict: None,
            notes: None,
        }
    })
}
