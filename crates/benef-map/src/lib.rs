//! Maps logical column names onto physical header positions.
//!
//! Resolution tries an ordered list of rules per column (exact, loose, then
//! column-specific substring fallbacks) and reports which one matched.

#![deny(unsafe_code)]

pub mod normalize;
pub mod resolve;
pub mod rules;

pub use normalize::{is_zero_width, normalize_header};
pub use resolve::{
    ColumnMatch, SUGGESTION_THRESHOLD, resolve_column, resolve_csv_columns,
    resolve_sheet_columns, suggest_column,
};
pub use rules::{ColumnSpec, HeaderRule, RuleKind};
