//! Ordered header-matching rules.
//!
//! A [`ColumnSpec`] pairs a logical column name with the rules tried, in
//! order, to find it. Each rule scans the header left to right and the first
//! matching cell wins, except [`HeaderRule::LastExact`] where the last one
//! does. New fallbacks are added by appending a rule.

use std::fmt;

use crate::normalize::{normalize_header, upper_trimmed, without_separators, without_whitespace};

/// One header-matching predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRule {
    /// Strict forms are equal (zero-width characters and whitespace removed,
    /// case folded).
    Exact,
    /// Same comparison as [`HeaderRule::Exact`], but the rightmost matching
    /// cell wins.
    LastExact,
    /// Equal after trimming, after removing whitespace, or after removing
    /// whitespace, `_` and `-`; always case-insensitive.
    Loose,
    /// The upper-cased header contains every fragment.
    ContainsAll(Vec<String>),
    /// The upper-cased header contains at least one fragment.
    ContainsAny(Vec<String>),
}

impl HeaderRule {
    /// Whether `header` satisfies this rule for the logical `name`.
    pub fn matches(&self, header: &str, name: &str) -> bool {
        match self {
            Self::Exact | Self::LastExact => {
                normalize_header(header) == normalize_header(name)
            }
            Self::Loose => {
                upper_trimmed(header) == upper_trimmed(name)
                    || without_whitespace(header) == without_whitespace(name)
                    || without_separators(header) == without_separators(name)
            }
            Self::ContainsAll(fragments) => {
                let upper = upper_trimmed(header);
                fragments.iter().all(|fragment| upper.contains(fragment.as_str()))
            }
            Self::ContainsAny(fragments) => {
                let upper = upper_trimmed(header);
                fragments.iter().any(|fragment| upper.contains(fragment.as_str()))
            }
        }
    }

    /// Whether the rightmost match wins instead of the leftmost.
    pub fn prefers_last(&self) -> bool {
        matches!(self, Self::LastExact)
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Exact | Self::LastExact => RuleKind::Exact,
            Self::Loose => RuleKind::Loose,
            Self::ContainsAll(_) | Self::ContainsAny(_) => RuleKind::Substring,
        }
    }
}

/// Tag describing how a column was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Exact,
    Loose,
    Substring,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Loose => write!(f, "loose"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// A logical column name and the rules used to locate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub rules: Vec<HeaderRule>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, rules: Vec<HeaderRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Join-key column: exact, then loose.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(name, vec![HeaderRule::Exact, HeaderRule::Loose])
    }

    /// Verdict column: exact (last duplicate wins), loose, then any header
    /// naming a "parecer técnico".
    pub fn verdict(name: impl Into<String>) -> Self {
        Self::new(
            name,
            vec![
                HeaderRule::LastExact,
                HeaderRule::Loose,
                HeaderRule::ContainsAll(vec!["PARECER".to_string(), "TECNICO".to_string()]),
            ],
        )
    }

    /// Notes column: exact (last duplicate wins), loose, then any header
    /// mentioning observations.
    pub fn notes(name: impl Into<String>) -> Self {
        Self::new(
            name,
            vec![
                HeaderRule::LastExact,
                HeaderRule::Loose,
                HeaderRule::ContainsAny(vec![
                    "OBSERVACOES".to_string(),
                    "OBSERVAÇÕES".to_string(),
                ]),
            ],
        )
    }
}
