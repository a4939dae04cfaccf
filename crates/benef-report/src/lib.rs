//! Export generation for validated beneficiaries.
//!
//! A single projection step pairs each original CSV row with its verdict,
//! notes and validation status. Three encoders consume it:
//!
//! - **CSV**: semicolon-delimited text with a byte-order mark
//! - **XLS**: an HTML table that spreadsheet tools open with highlighting
//! - **HTML**: a standalone colored page showing matched rows only

#![deny(unsafe_code)]

mod delimited;
mod export;
mod html;
mod projection;

pub use delimited::{DelimitedEncoder, OUTPUT_SEPARATOR, needs_quoting};
pub use export::{Encoder, Export, ExportFormat, export};
pub use html::{HIGHLIGHT_CLASS, SpreadsheetHtmlEncoder, StandaloneHtmlEncoder};
pub use projection::{
    NOTES_HEADER, ProjectedRow, Projection, STATUS_HEADER, ValidationStatus, VERDICT_HEADER,
    project,
};
