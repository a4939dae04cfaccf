//! Data model for the beneficiary validator.
//!
//! Tables come out of the tokenizer, record sets out of the loaders, and
//! reconciliation results out of the engine. Nothing here performs I/O.

#![deny(unsafe_code)]

pub mod error;
pub mod options;
pub mod record;
pub mod redact;
pub mod result;
pub mod table;

pub use error::{FetchError, LoadError, ReconcileError, format_found_columns};
pub use options::{
    ColumnNames, DEFAULT_CSV_IDENTIFIER_COLUMN, DEFAULT_NOTES_COLUMN, DEFAULT_SHEET_ID,
    DEFAULT_SHEET_IDENTIFIER_COLUMN, DEFAULT_SHEET_TAB, DEFAULT_VERDICT_COLUMN, SheetRequest,
};
pub use record::{LoadStatus, RecordSet, ResolvedColumns, Side, SourceRecord};
pub use redact::redact_value;
pub use result::{
    GroupSummary, MatchedRecord, NO_VERDICT_LABEL, ReconciliationResult, ResultSummary,
    TECHNICAL_DECLINE, VerdictGroup, is_technical_decline,
};
pub use table::{Row, Separator, Table};
