//! Row projection shared by every encoder.
//!
//! Each original CSV data row is paired with the verdict and notes of its
//! match (if any) and a derived validation status. Status computation lives
//! here and nowhere else.

use std::collections::HashMap;

use benef_ingest::normalize_identifier;
use benef_model::{MatchedRecord, RecordSet, ReconciliationResult, Row, is_technical_decline};

/// Header of the appended verdict column.
pub const VERDICT_HEADER: &str = "Parecer Técnico";
/// Header of the appended notes column.
pub const NOTES_HEADER: &str = "Observações";
/// Header of the appended status column.
pub const STATUS_HEADER: &str = "Status Validação";

/// Validation outcome of one exported row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// Matched, and the verdict mentions a technical decline.
    TechnicalDecline,
    /// Matched with any other verdict.
    Ok,
    /// No sheet record shares the row's identifier.
    NotValidated,
}

impl ValidationStatus {
    pub fn from_verdict(verdict: &str) -> Self {
        if is_technical_decline(verdict) {
            Self::TechnicalDecline
        } else {
            Self::Ok
        }
    }

    /// Text written to the status column.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::TechnicalDecline => "DECLÍNIO TÉCNICO",
            Self::Ok => "OK",
            Self::NotValidated => "NÃO VALIDADO",
        }
    }

    pub const fn is_highlighted(self) -> bool {
        matches!(self, Self::TechnicalDecline)
    }

    pub const fn is_matched(self) -> bool {
        !matches!(self, Self::NotValidated)
    }
}

/// One original CSV row plus its derived columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow<'a> {
    /// Index of the row in the CSV table.
    pub row_index: usize,
    pub cells: &'a Row,
    pub verdict: &'a str,
    pub notes: &'a str,
    pub status: ValidationStatus,
}

impl ProjectedRow<'_> {
    /// Original cells, padded with empty values up to `width`.
    pub fn padded_cells(&self, width: usize) -> impl Iterator<Item = &str> {
        let len = self.cells.len().max(width);
        (0..len).map(move |idx| self.cells.cell(idx))
    }
}

/// Every CSV data row in original order, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub header: &'a Row,
    pub rows: Vec<ProjectedRow<'a>>,
}

impl<'a> Projection<'a> {
    /// Number of original columns (the header's width).
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn matched_rows(&self) -> impl Iterator<Item = &ProjectedRow<'a>> {
        self.rows.iter().filter(|row| row.status.is_matched())
    }
}

/// Projects every CSV data row against the reconciliation result.
///
/// When several matched records share a normalized identifier, the last one
/// met while walking the groups in order (and each group's records in order)
/// provides the verdict and notes.
pub fn project<'a>(result: &'a ReconciliationResult, csv: &'a RecordSet) -> Projection<'a> {
    let mut by_key: HashMap<&str, &MatchedRecord> = HashMap::new();
    for record in result.matched_records() {
        if !record.key.is_empty() {
            by_key.insert(record.key.as_str(), record);
        }
    }

    let identifier = csv.columns().identifier;
    let rows = csv
        .table()
        .data_rows()
        .map(|(row_index, cells)| {
            let key = normalize_identifier(cells.cell(identifier));
            match by_key.get(key.as_str()).copied() {
                Some(record) => ProjectedRow {
                    row_index,
                    cells,
                    verdict: record.verdict.as_str(),
                    notes: record.notes.as_str(),
                    status: ValidationStatus::from_verdict(&record.verdict),
                },
                None => ProjectedRow {
                    row_index,
                    cells,
                    verdict: "",
                    notes: "",
                    status: ValidationStatus::NotValidated,
                },
            }
        })
        .collect();

    Projection {
        header: csv.header(),
        rows,
    }
}
