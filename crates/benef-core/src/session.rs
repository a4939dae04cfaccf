//! Session state: both record sets, the latest result, and its cursor.

use std::path::Path;

use benef_ingest::{SheetSource, load_csv_text, load_sheet, load_sheet_text, read_csv_file};
use benef_model::{
    ColumnNames, LoadError, LoadStatus, RecordSet, ReconcileError, ReconciliationResult,
    SheetRequest, Side,
};
use benef_report::{Export, ExportFormat, export};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::engine::reconcile;
use crate::view::GroupView;

/// One validation session.
///
/// Each side is loaded independently and in any order. A failed load leaves
/// that side's previous records in place; a successful load replaces them and
/// discards any reconciliation result built from the old data.
#[derive(Debug, Default)]
pub struct ValidationSession {
    columns: ColumnNames,
    sheet: Option<RecordSet>,
    csv: Option<RecordSet>,
    result: Option<ReconciliationResult>,
}

impl ValidationSession {
    pub fn new(columns: ColumnNames) -> Self {
        Self {
            columns: columns.normalized(),
            ..Self::default()
        }
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Replaces the column names used by subsequent loads.
    pub fn set_columns(&mut self, columns: ColumnNames) {
        self.columns = columns.normalized();
    }

    /// Fetches and loads the sheet side.
    pub async fn load_sheet<S: SheetSource>(
        &mut self,
        source: &S,
        request: &SheetRequest,
    ) -> Result<LoadStatus, LoadError> {
        let loaded = load_sheet(source, request, &self.columns).await;
        self.store(Side::Sheet, loaded)
    }

    /// Loads the sheet side from already-fetched text.
    pub fn load_sheet_text(&mut self, text: &str) -> Result<LoadStatus, LoadError> {
        let loaded = load_sheet_text(text, &self.columns);
        self.store(Side::Sheet, loaded)
    }

    /// Loads the CSV side from text.
    pub fn load_csv_text(&mut self, text: &str) -> Result<LoadStatus, LoadError> {
        let loaded = load_csv_text(text, &self.columns.csv_identifier);
        self.store(Side::Csv, loaded)
    }

    /// Reads and loads the CSV side from a `.csv` file.
    pub fn load_csv_file(&mut self, path: &Path) -> Result<LoadStatus, LoadError> {
        let loaded = read_csv_file(path)
            .and_then(|text| load_csv_text(&text, &self.columns.csv_identifier));
        self.store(Side::Csv, loaded)
    }

    fn store(
        &mut self,
        side: Side,
        loaded: Result<RecordSet, LoadError>,
    ) -> Result<LoadStatus, LoadError> {
        match loaded {
            Ok(records) => {
                let status = records.status();
                info!(side = %side, status = %status.user_message(), "side loaded");
                match side {
                    Side::Sheet => self.sheet = Some(records),
                    Side::Csv => self.csv = Some(records),
                }
                self.result = None;
                Ok(status)
            }
            Err(err) => {
                warn!(side = %side, error = %err, "load failed; keeping previous records");
                Err(err)
            }
        }
    }

    pub fn sheet(&self) -> Option<&RecordSet> {
        self.sheet.as_ref()
    }

    pub fn csv(&self) -> Option<&RecordSet> {
        self.csv.as_ref()
    }

    /// Both sides are loaded.
    pub fn is_ready(&self) -> bool {
        self.sheet.is_some() && self.csv.is_some()
    }

    /// Runs the join, replacing any previous result.
    ///
    /// A join without matches stores an empty result and reports
    /// [`ReconcileError::NothingToShow`].
    pub fn reconcile(&mut self) -> Result<&ReconciliationResult, ReconcileError> {
        let sheet = self.sheet.as_ref().ok_or(ReconcileError::SheetNotLoaded)?;
        let csv = self.csv.as_ref().ok_or(ReconcileError::CsvNotLoaded)?;
        let result = reconcile(sheet, csv);
        let empty = result.is_empty();
        let stored = self.result.insert(result);
        if empty {
            warn!("reconciliation produced no matches");
            return Err(ReconcileError::NothingToShow);
        }
        Ok(&*stored)
    }

    pub fn result(&self) -> Option<&ReconciliationResult> {
        self.result.as_ref()
    }

    /// Moves to the next group; returns whether the cursor moved.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        self.result.as_mut().is_some_and(ReconciliationResult::next)
    }

    /// Moves to the previous group; returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        self.result
            .as_mut()
            .is_some_and(ReconciliationResult::previous)
    }

    /// Page view of the group under the cursor.
    pub fn current_view(&self) -> Option<GroupView> {
        let result = self.result.as_ref()?;
        let csv = self.csv.as_ref()?;
        GroupView::current(result, csv.header(), csv.columns().identifier)
    }

    /// Encodes the latest result. Requires a reconciliation with matches.
    pub fn export(&self, format: ExportFormat, date: NaiveDate) -> Result<Export, ReconcileError> {
        let (Some(result), Some(csv)) = (self.result.as_ref(), self.csv.as_ref()) else {
            return Err(ReconcileError::NotReconciled);
        };
        if result.is_empty() {
            return Err(ReconcileError::NotReconciled);
        }
        Ok(export(format, result, csv, date))
    }
}
