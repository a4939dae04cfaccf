//! Reconciliation output: verdict groups and the paging cursor over them.

use serde::Serialize;

use crate::table::Row;

/// Group label used when a matched sheet row carries no verdict.
pub const NO_VERDICT_LABEL: &str = "Sem Parecer";

/// Verdict fragment (lower-cased) that flags a record for highlighting.
pub const TECHNICAL_DECLINE: &str = "declínio técnico";

/// Whether a verdict text denotes a technical decline (case-insensitive).
pub fn is_technical_decline(verdict: &str) -> bool {
    verdict.to_lowercase().contains(TECHNICAL_DECLINE)
}

/// One CSV record paired with one sheet record sharing its normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRecord {
    /// Identifier as written in the CSV.
    pub identifier: String,
    /// Normalized join key. Lookup only, never displayed.
    #[serde(skip)]
    pub key: String,
    pub csv_row_index: usize,
    pub sheet_row_index: usize,
    /// Full CSV row, kept for column-preserving export.
    pub csv_row: Row,
    /// Sheet verdict, already labelled with [`NO_VERDICT_LABEL`] when blank.
    pub verdict: String,
    pub notes: String,
}

impl MatchedRecord {
    pub fn is_technical_decline(&self) -> bool {
        is_technical_decline(&self.verdict)
    }
}

/// Matched records sharing one verdict, in production order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictGroup {
    pub verdict: String,
    pub records: Vec<MatchedRecord>,
}

impl VerdictGroup {
    pub fn new(verdict: impl Into<String>) -> Self {
        Self {
            verdict: verdict.into(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Grouped matches plus a cursor addressing the group on display.
///
/// The cursor is clamped to `[0, groups - 1]`; moving past either end is a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    groups: Vec<VerdictGroup>,
    cursor: usize,
    matched_csv_records: usize,
    unmatched_csv_records: usize,
}

impl ReconciliationResult {
    pub fn new(
        groups: Vec<VerdictGroup>,
        matched_csv_records: usize,
        unmatched_csv_records: usize,
    ) -> Self {
        Self {
            groups,
            cursor: 0,
            matched_csv_records,
            unmatched_csv_records,
        }
    }

    pub fn groups(&self) -> &[VerdictGroup] {
        &self.groups
    }

    /// True when the join produced no match at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total (CSV record, sheet record) pairs across all groups.
    pub fn match_count(&self) -> usize {
        self.groups.iter().map(VerdictGroup::len).sum()
    }

    /// CSV records that found at least one sheet counterpart.
    pub fn matched_csv_count(&self) -> usize {
        self.matched_csv_records
    }

    /// CSV records left out of every group because no sheet row shares their key.
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_csv_records
    }

    /// Every matched record, group by group.
    pub fn matched_records(&self) -> impl Iterator<Item = &MatchedRecord> {
        self.groups.iter().flat_map(|group| group.records.iter())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&VerdictGroup> {
        self.groups.get(self.cursor)
    }

    pub fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.groups.len()
    }

    pub fn is_at_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_last(&self) -> bool {
        !self.can_go_next()
    }

    /// Advances the cursor; returns whether it moved.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor back; returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Counter text such as `"2 / 5"`.
    pub fn counter_label(&self) -> String {
        if self.groups.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.cursor + 1, self.groups.len())
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            groups: self
                .groups
                .iter()
                .map(|group| GroupSummary {
                    verdict: group.verdict.clone(),
                    records: group.len(),
                    technical_decline: is_technical_decline(&group.verdict),
                })
                .collect(),
            total_matches: self.match_count(),
            matched_csv_records: self.matched_csv_records,
            unmatched_csv_records: self.unmatched_csv_records,
        }
    }
}

/// Serializable counts for machine consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub groups: Vec<GroupSummary>,
    pub total_matches: usize,
    pub matched_csv_records: usize,
    pub unmatched_csv_records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub verdict: String,
    pub records: usize,
    pub technical_decline: bool,
}
