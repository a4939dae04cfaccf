//! Loaded record sets, one per data source.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::table::{Row, Table};

/// Which of the two sources a record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The privileged spreadsheet carrying verdicts and notes.
    Sheet,
    /// The uploaded beneficiary CSV.
    Csv,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sheet => write!(f, "sheet"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

/// Column positions resolved once per load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub identifier: usize,
    pub verdict: Option<usize>,
    pub notes: Option<usize>,
}

/// One identifier-bearing data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    /// Index of the originating row in the source table.
    pub row_index: usize,
    /// Identifier cell, trimmed but not normalized.
    pub identifier: String,
    /// Verdict cell, empty when absent or when the column was not found.
    pub verdict: String,
    /// Notes cell, empty when absent or when the column was not found.
    pub notes: String,
}

/// Records loaded from one source, together with the table they came from.
#[derive(Debug, Clone)]
pub struct RecordSet {
    side: Side,
    table: Arc<Table>,
    columns: ResolvedColumns,
    records: Vec<SourceRecord>,
}

impl RecordSet {
    pub fn new(
        side: Side,
        table: Arc<Table>,
        columns: ResolvedColumns,
        records: Vec<SourceRecord>,
    ) -> Self {
        Self {
            side,
            table,
            columns,
            records,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Header row of the source table (empty when the table has none).
    pub fn header(&self) -> &Row {
        static EMPTY: Row = Row::empty();
        self.table.header().unwrap_or(&EMPTY)
    }

    pub fn columns(&self) -> ResolvedColumns {
        self.columns
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Full source row a record was read from.
    pub fn row(&self, record: &SourceRecord) -> Option<&Row> {
        self.table.row(record.row_index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn status(&self) -> LoadStatus {
        if self.records.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Loaded {
                identifiers: self.records.len(),
            }
        }
    }
}

/// Outcome of a structurally successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded { identifiers: usize },
    /// The identifier column exists but no data row carries a value.
    Empty,
}

impl LoadStatus {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Status line shown to portal users.
    pub fn user_message(self) -> String {
        match self {
            Self::Loaded { identifiers } => {
                format!("Concluído: {identifiers} CPF(s) encontrado(s)")
            }
            Self::Empty => "Nenhum CPF encontrado na coluna especificada".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Separator;

    fn record_set(records: Vec<SourceRecord>) -> RecordSet {
        let table = Table::new(
            Separator::Comma,
            vec![
                ["CPF", "Parecer"].into_iter().collect(),
                ["111", "Aprovado"].into_iter().collect(),
            ],
        );
        RecordSet::new(
            Side::Sheet,
            Arc::new(table),
            ResolvedColumns {
                identifier: 0,
                verdict: Some(1),
                notes: None,
            },
            records,
        )
    }

    #[test]
    fn status_reports_identifier_count() {
        let set = record_set(vec![SourceRecord {
            row_index: 1,
            identifier: "111".to_string(),
            verdict: "Aprovado".to_string(),
            notes: String::new(),
        }]);
        assert_eq!(set.status(), LoadStatus::Loaded { identifiers: 1 });
        assert_eq!(
            set.status().user_message(),
            "Concluído: 1 CPF(s) encontrado(s)"
        );
        let row = set.row(&set.records()[0]).expect("row");
        assert_eq!(row.cell(1), "Aprovado");
    }

    #[test]
    fn empty_set_is_reported_as_empty() {
        let set = record_set(Vec::new());
        assert!(set.status().is_empty());
        assert_eq!(set.header().cell(0), "CPF");
    }
}
