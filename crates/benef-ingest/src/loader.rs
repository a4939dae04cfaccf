//! Sheet-side and CSV-side loaders.
//!
//! Both sides share the tokenizer and the header resolver. The sheet side
//! resolves identifier, verdict and notes; the CSV side only the identifier.
//! A missing identifier column is fatal for the load; zero identifier-bearing
//! rows is a successful, empty load.

use std::sync::Arc;

use benef_map::{resolve_csv_columns, resolve_sheet_columns, suggest_column};
use benef_model::{
    ColumnNames, LoadError, RecordSet, ResolvedColumns, Row, SheetRequest, Side, SourceRecord,
    Table,
};
use tracing::{info, info_span, warn};

use crate::file::strip_bom;
use crate::source::SheetSource;
use crate::tokenizer::parse;

/// Fetches sheet text from `source` and loads it.
pub async fn load_sheet<S: SheetSource>(
    source: &S,
    request: &SheetRequest,
    columns: &ColumnNames,
) -> Result<RecordSet, LoadError> {
    let text = source.fetch(request).await?;
    load_sheet_text(&text, columns)
}

/// Loads sheet records from already-fetched text.
pub fn load_sheet_text(text: &str, columns: &ColumnNames) -> Result<RecordSet, LoadError> {
    let _span = info_span!("load", side = %Side::Sheet).entered();
    let table = parse(strip_bom(text));
    let header = header_of(&table);
    let resolved = resolve_sheet_columns(header, columns).ok_or_else(|| {
        missing_identifier(Side::Sheet, header, &columns.sheet_identifier)
    })?;
    if resolved.verdict.is_none() {
        warn!(column = %columns.verdict, "verdict column not found; matches will be unlabelled");
    }
    if resolved.notes.is_none() {
        warn!(column = %columns.notes, "notes column not found");
    }
    Ok(build_record_set(Side::Sheet, table, resolved))
}

/// Loads CSV records from local text. A leading byte-order mark is ignored.
pub fn load_csv_text(text: &str, identifier_column: &str) -> Result<RecordSet, LoadError> {
    let _span = info_span!("load", side = %Side::Csv).entered();
    let table = parse(strip_bom(text));
    let header = header_of(&table);
    let resolved = resolve_csv_columns(header, identifier_column)
        .ok_or_else(|| missing_identifier(Side::Csv, header, identifier_column))?;
    Ok(build_record_set(Side::Csv, table, resolved))
}

fn header_of(table: &Table) -> &Row {
    static EMPTY: Row = Row::empty();
    table.header().unwrap_or(&EMPTY)
}

fn missing_identifier(side: Side, header: &Row, column: &str) -> LoadError {
    let err = LoadError::MissingIdentifierColumn {
        side,
        column: column.to_string(),
        found: header.cells().to_vec(),
        suggestion: suggest_column(header, column),
    };
    warn!(error = %err, "identifier column not resolved");
    err
}

fn build_record_set(side: Side, table: Table, columns: ResolvedColumns) -> RecordSet {
    let records: Vec<SourceRecord> = table
        .data_rows()
        .filter_map(|(row_index, row)| {
            let identifier = row.cell(columns.identifier).trim();
            if identifier.is_empty() {
                return None;
            }
            Some(SourceRecord {
                row_index,
                identifier: identifier.to_string(),
                verdict: optional_cell(row, columns.verdict),
                notes: optional_cell(row, columns.notes),
            })
        })
        .collect();

    if records.is_empty() {
        warn!(data_rows = table.data_len(), "no identifier values found");
    } else {
        info!(
            records = records.len(),
            data_rows = table.data_len(),
            identifier_column = columns.identifier,
            verdict_column = ?columns.verdict,
            notes_column = ?columns.notes,
            "records loaded"
        );
    }
    RecordSet::new(side, Arc::new(table), columns, records)
}

fn optional_cell(row: &Row, index: Option<usize>) -> String {
    index.map_or_else(String::new, |idx| row.cell(idx).trim().to_string())
}

#[cfg(test)]
mod tests {
    use benef_model::LoadStatus;

    use super::*;

    #[test]
    fn sheet_load_reads_verdict_and_notes() {
        let text = "CPF;Nome;Parecer Técnico;Observações\n\
                    111.222.333-44;Ana;Aprovado;ok\n\
                    ;Sem CPF;Aprovado;\n\
                    555;Bia;;pendente doc\n";
        let set = load_sheet_text(text, &ColumnNames::default()).expect("load");
        assert_eq!(set.side(), Side::Sheet);
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].identifier, "111.222.333-44");
        assert_eq!(set.records()[0].verdict, "Aprovado");
        assert_eq!(set.records()[0].notes, "ok");
        assert_eq!(set.records()[1].row_index, 3);
        assert_eq!(set.records()[1].verdict, "");
        assert_eq!(set.records()[1].notes, "pendente doc");
    }

    #[test]
    fn csv_side_ignores_verdict_columns() {
        let text = "\u{feff}NUM_CPF,Parecer Técnico\n123,Aprovado\n";
        let set = load_csv_text(text, "NUM_CPF").expect("load");
        assert_eq!(set.side(), Side::Csv);
        assert_eq!(set.records()[0].verdict, "");
        assert_eq!(set.columns().verdict, None);
        assert_eq!(set.header().cell(0), "NUM_CPF");
    }

    #[test]
    fn header_without_identifier_values_is_empty_not_error() {
        let set = load_csv_text("NUM_CPF,Nome\n,Ana\n , Bia\n", "NUM_CPF").expect("load");
        assert!(set.is_empty());
        assert_eq!(set.status(), LoadStatus::Empty);
    }

    #[test]
    fn empty_text_is_input_absent() {
        let err = load_csv_text("", "NUM_CPF").unwrap_err();
        match err {
            LoadError::MissingIdentifierColumn { found, .. } => assert!(found.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
