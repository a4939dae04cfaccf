//! The reconciliation join.

use std::collections::HashMap;

use benef_ingest::normalize_identifier;
use benef_model::{
    MatchedRecord, NO_VERDICT_LABEL, RecordSet, ReconciliationResult, SourceRecord, VerdictGroup,
    redact_value,
};
use tracing::{debug, info, info_span};

/// Joins `csv` against `sheet` on the normalized identifier and groups the
/// matches by verdict.
///
/// CSV records are visited in row order and, for each, every sheet record
/// sharing its key in sheet order. Groups appear in the order their verdict
/// was first produced; records keep production order within a group. Blank
/// verdicts are labelled [`NO_VERDICT_LABEL`]. Empty keys never match.
pub fn reconcile(sheet: &RecordSet, csv: &RecordSet) -> ReconciliationResult {
    let _span = info_span!("reconcile").entered();

    let mut sheet_by_key: HashMap<String, Vec<&SourceRecord>> = HashMap::new();
    for record in sheet.records() {
        let key = normalize_identifier(&record.identifier);
        if key.is_empty() {
            continue;
        }
        sheet_by_key.entry(key).or_default().push(record);
    }

    let mut groups: Vec<VerdictGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut matched_csv = 0usize;
    let mut unmatched_csv = 0usize;

    for csv_record in csv.records() {
        let key = normalize_identifier(&csv_record.identifier);
        let Some(matches) = sheet_by_key.get(&key).filter(|_| !key.is_empty()) else {
            unmatched_csv += 1;
            debug!(
                identifier = redact_value(&csv_record.identifier),
                row = csv_record.row_index,
                "no sheet record for CSV identifier"
            );
            continue;
        };
        matched_csv += 1;
        let csv_row = csv.row(csv_record).cloned().unwrap_or_default();

        for sheet_record in matches {
            let verdict = if sheet_record.verdict.is_empty() {
                NO_VERDICT_LABEL.to_string()
            } else {
                sheet_record.verdict.clone()
            };
            let slot = *group_index.entry(verdict.clone()).or_insert_with(|| {
                groups.push(VerdictGroup::new(verdict.clone()));
                groups.len() - 1
            });
            groups[slot].records.push(MatchedRecord {
                identifier: csv_record.identifier.clone(),
                key: key.clone(),
                csv_row_index: csv_record.row_index,
                sheet_row_index: sheet_record.row_index,
                csv_row: csv_row.clone(),
                verdict,
                notes: sheet_record.notes.clone(),
            });
        }
    }

    let result = ReconciliationResult::new(groups, matched_csv, unmatched_csv);
    info!(
        sheet_records = sheet.len(),
        csv_records = csv.len(),
        groups = result.group_count(),
        matches = result.match_count(),
        unmatched_csv_records = unmatched_csv,
        "reconciliation finished"
    );
    result
}
