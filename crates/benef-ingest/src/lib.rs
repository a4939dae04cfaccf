//! Ingestion: raw text to record sets.
//!
//! Text is tokenized into a [`benef_model::Table`], headers are resolved once
//! per load, and identifier-bearing rows become
//! [`benef_model::SourceRecord`]s. Sheet text arrives through a
//! [`SheetSource`]; CSV text is read locally.

#![deny(unsafe_code)]

pub mod file;
pub mod identifier;
pub mod loader;
pub mod source;
pub mod tokenizer;

pub use file::{decode_text, is_csv_path, read_csv_file, strip_bom};
pub use identifier::normalize_identifier;
pub use loader::{load_csv_text, load_sheet, load_sheet_text};
pub use source::{FileSheetSource, HttpSheetSource, SheetSource, classify_status};
pub use tokenizer::{clean_field, detect_separator, parse, parse_line};
