//! Export formats, the encoder seam, and dated artifacts.

use std::fmt;

use benef_model::{RecordSet, ReconciliationResult};
use chrono::NaiveDate;
use tracing::info;

use crate::delimited::DelimitedEncoder;
use crate::html::{SpreadsheetHtmlEncoder, StandaloneHtmlEncoder};
use crate::projection::{Projection, project};

/// Turns a projection into an artifact body.
///
/// Encoders are stateless apart from presentation inputs such as a date, and
/// assume the projection comes from a successful reconciliation.
pub trait Encoder {
    fn format(&self) -> ExportFormat;
    fn encode(&self, projection: &Projection<'_>) -> String;
}

/// The three artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Semicolon-delimited text.
    Csv,
    /// HTML table opened by spreadsheet tools.
    Xls,
    /// Standalone colored HTML page.
    Html,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Xls, Self::Html];

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8;",
            Self::Xls => "application/vnd.ms-excel",
            Self::Html => "text/html;charset=utf-8;",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Html => "html",
        }
    }

    const fn file_stem(self) -> &'static str {
        match self {
            Self::Csv => "beneficiarios_validados",
            Self::Xls => "beneficiarios_validados_formatado",
            Self::Html => "beneficiarios_validados_colorido",
        }
    }

    /// Artifact name such as `beneficiarios_validados_2024-03-05.csv`.
    pub fn file_name(self, date: NaiveDate) -> String {
        format!(
            "{}_{}.{}",
            self.file_stem(),
            date.format("%Y-%m-%d"),
            self.extension()
        )
    }

    /// Encoder producing this format. `date` is used by formats that print it.
    pub fn encoder(self, date: NaiveDate) -> Box<dyn Encoder> {
        match self {
            Self::Csv => Box::new(DelimitedEncoder),
            Self::Xls => Box::new(SpreadsheetHtmlEncoder),
            Self::Html => Box::new(StandaloneHtmlEncoder::new(date)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An encoded artifact ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Projects `csv` against `result` and encodes it as `format`.
pub fn export(
    format: ExportFormat,
    result: &ReconciliationResult,
    csv: &RecordSet,
    date: NaiveDate,
) -> Export {
    let projection = project(result, csv);
    let encoder = format.encoder(date);
    let body = encoder.encode(&projection);
    info!(
        format = %encoder.format(),
        rows = projection.rows.len(),
        matched_rows = projection.matched_rows().count(),
        bytes = body.len(),
        "export encoded"
    );
    Export {
        format,
        file_name: format.file_name(date),
        content_type: format.content_type(),
        body,
    }
}
