//! Page view of the group under the cursor.

use benef_model::{ReconciliationResult, Row, VerdictGroup};
use serde::Serialize;

/// Label of the leading identifier column.
pub const IDENTIFIER_LABEL: &str = "CPF";
/// Label of the trailing notes column.
pub const NOTES_LABEL: &str = "Observações";
/// Shown in the notes column when a record has none.
pub const EMPTY_NOTES: &str = "-";

/// One displayed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    pub cells: Vec<String>,
    /// The record's verdict mentions a technical decline.
    pub highlighted: bool,
}

/// Display-ready page for one verdict group.
///
/// Columns are the identifier, then every CSV column with a non-blank header
/// holding at least one non-empty value in this group, then the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub verdict: String,
    pub record_count: usize,
    /// Counter text such as `"2 / 5"`.
    pub counter: String,
    pub columns: Vec<String>,
    pub rows: Vec<ViewRow>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl GroupView {
    /// View of the current group, or `None` when the result is empty.
    pub fn current(
        result: &ReconciliationResult,
        csv_header: &Row,
        identifier_column: usize,
    ) -> Option<Self> {
        let group = result.current()?;
        let shown = columns_with_data(group, csv_header, identifier_column);

        let mut columns = Vec::with_capacity(shown.len() + 2);
        columns.push(IDENTIFIER_LABEL.to_string());
        columns.extend(shown.iter().map(|&idx| csv_header.cell(idx).trim().to_string()));
        columns.push(NOTES_LABEL.to_string());

        let rows = group
            .records
            .iter()
            .map(|record| {
                let mut cells = Vec::with_capacity(columns.len());
                cells.push(record.identifier.clone());
                cells.extend(shown.iter().map(|&idx| record.csv_row.cell(idx).to_string()));
                cells.push(if record.notes.is_empty() {
                    EMPTY_NOTES.to_string()
                } else {
                    record.notes.clone()
                });
                ViewRow {
                    cells,
                    highlighted: record.is_technical_decline(),
                }
            })
            .collect();

        Some(Self {
            verdict: group.verdict.clone(),
            record_count: group.len(),
            counter: result.counter_label(),
            columns,
            rows,
            can_go_previous: result.can_go_previous(),
            can_go_next: result.can_go_next(),
        })
    }
}

fn columns_with_data(group: &VerdictGroup, header: &Row, identifier_column: usize) -> Vec<usize> {
    (0..header.len())
        .filter(|&idx| idx != identifier_column && !header.cell(idx).trim().is_empty())
        .filter(|&idx| {
            group
                .records
                .iter()
                .any(|record| !record.csv_row.cell(idx).trim().is_empty())
        })
        .collect()
}
