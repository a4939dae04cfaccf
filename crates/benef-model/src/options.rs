//! Per-invocation inputs: logical column names and sheet coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spreadsheet holding the reference verdicts.
pub const DEFAULT_SHEET_ID: &str = "1iqSIy7R1vyFizribGrO7QpF8W8u--zDUcAv0nDQ3N6s";
pub const DEFAULT_SHEET_TAB: &str = "Dados";
pub const DEFAULT_SHEET_IDENTIFIER_COLUMN: &str = "CPF";
pub const DEFAULT_CSV_IDENTIFIER_COLUMN: &str = "NUM_CPF";
pub const DEFAULT_VERDICT_COLUMN: &str = "Parecer Técnico";
pub const DEFAULT_NOTES_COLUMN: &str = "Observações";

/// Logical column names used to resolve headers on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub sheet_identifier: String,
    pub csv_identifier: String,
    pub verdict: String,
    pub notes: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            sheet_identifier: DEFAULT_SHEET_IDENTIFIER_COLUMN.to_string(),
            csv_identifier: DEFAULT_CSV_IDENTIFIER_COLUMN.to_string(),
            verdict: DEFAULT_VERDICT_COLUMN.to_string(),
            notes: DEFAULT_NOTES_COLUMN.to_string(),
        }
    }
}

impl ColumnNames {
    /// Replaces blank overrides with the defaults, trimming the rest.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            sheet_identifier: non_blank_or(self.sheet_identifier, defaults.sheet_identifier),
            csv_identifier: non_blank_or(self.csv_identifier, defaults.csv_identifier),
            verdict: non_blank_or(self.verdict, defaults.verdict),
            notes: non_blank_or(self.notes, defaults.notes),
        }
    }
}

fn non_blank_or(value: String, fallback: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed.to_string()
    }
}

/// Coordinates of an authenticated sheet fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct SheetRequest {
    /// Caller identity token forwarded to the sheet service.
    pub id_token: String,
    pub sheet_id: String,
    pub sheet_tab: String,
}

impl SheetRequest {
    /// Request against the default spreadsheet. A blank tab falls back to
    /// [`DEFAULT_SHEET_TAB`].
    pub fn new(id_token: impl Into<String>, sheet_tab: impl Into<String>) -> Self {
        Self {
            id_token: id_token.into(),
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            sheet_tab: non_blank_or(sheet_tab.into(), DEFAULT_SHEET_TAB.to_string()),
        }
    }

    #[must_use]
    pub fn with_sheet_id(mut self, sheet_id: impl Into<String>) -> Self {
        self.sheet_id = non_blank_or(sheet_id.into(), DEFAULT_SHEET_ID.to_string());
        self
    }
}

impl fmt::Debug for SheetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetRequest")
            .field("id_token", &"[REDACTED]")
            .field("sheet_id", &self.sheet_id)
            .field("sheet_tab", &self.sheet_tab)
            .finish()
    }
}
