//! Command-line argument definitions.

use std::path::PathBuf;

use benef_map::ColumnSpec;
use benef_model::{
    ColumnNames, DEFAULT_CSV_IDENTIFIER_COLUMN, DEFAULT_NOTES_COLUMN, DEFAULT_SHEET_ID,
    DEFAULT_SHEET_IDENTIFIER_COLUMN, DEFAULT_SHEET_TAB, DEFAULT_VERDICT_COLUMN, SheetRequest,
};
use benef_report::ExportFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "benef",
    version,
    about = "Validate beneficiary CPFs against the reference sheet",
    long_about = "Reconcile an uploaded beneficiary CSV against the reference sheet.\n\n\
                  Records are matched on the CPF digits, grouped by technical verdict,\n\
                  and exported as CSV, spreadsheet HTML (.xls) or standalone HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include CPF values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a CSV against the reference sheet and export the results.
    Validate(ValidateArgs),

    /// Show how a CSV file is tokenized and which column a name resolves to.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Beneficiary CSV to validate.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: PathBuf,

    /// Read the sheet from a local CSV export instead of the sheet service.
    #[arg(long = "sheet-file", value_name = "FILE")]
    pub sheet_file: Option<PathBuf>,

    /// Sheet service endpoint.
    #[arg(long = "endpoint", value_name = "URL", env = "BENEF_SHEETS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Identity token forwarded to the sheet service.
    #[arg(
        long = "id-token",
        value_name = "TOKEN",
        env = "BENEF_ID_TOKEN",
        hide_env_values = true
    )]
    pub id_token: Option<String>,

    /// Spreadsheet id.
    #[arg(long = "sheet-id", value_name = "ID", default_value = DEFAULT_SHEET_ID)]
    pub sheet_id: String,

    /// Sheet tab holding the verdicts.
    #[arg(long = "sheet-tab", value_name = "TAB", default_value = DEFAULT_SHEET_TAB)]
    pub sheet_tab: String,

    /// Identifier column in the sheet.
    #[arg(
        long = "sheet-column",
        value_name = "NAME",
        default_value = DEFAULT_SHEET_IDENTIFIER_COLUMN
    )]
    pub sheet_column: String,

    /// Identifier column in the CSV.
    #[arg(
        long = "csv-column",
        value_name = "NAME",
        default_value = DEFAULT_CSV_IDENTIFIER_COLUMN
    )]
    pub csv_column: String,

    /// Verdict column in the sheet.
    #[arg(
        long = "verdict-column",
        value_name = "NAME",
        default_value = DEFAULT_VERDICT_COLUMN
    )]
    pub verdict_column: String,

    /// Notes column in the sheet.
    #[arg(
        long = "notes-column",
        value_name = "NAME",
        default_value = DEFAULT_NOTES_COLUMN
    )]
    pub notes_column: String,

    /// Directory for exported files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Export format to write.
    #[arg(long = "format", value_enum, default_value = "all")]
    pub format: ExportFormatArg,

    /// Date stamped into export names and the HTML title (default: today).
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Reconcile and report without writing exports.
    #[arg(long = "no-export")]
    pub no_export: bool,

    /// Print the result summary as JSON on stdout instead of tables.
    #[arg(long = "summary-json")]
    pub summary_json: bool,
}

impl ValidateArgs {
    pub fn column_names(&self) -> ColumnNames {
        ColumnNames {
            sheet_identifier: self.sheet_column.clone(),
            csv_identifier: self.csv_column.clone(),
            verdict: self.verdict_column.clone(),
            notes: self.notes_column.clone(),
        }
        .normalized()
    }

    pub fn sheet_request(&self) -> SheetRequest {
        SheetRequest::new(self.id_token.clone().unwrap_or_default(), &*self.sheet_tab)
            .with_sheet_id(&*self.sheet_id)
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CSV file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Column name to resolve against the header.
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Rule set used to resolve `--column`.
    #[arg(long = "role", value_enum, default_value = "identifier")]
    pub role: ColumnRoleArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColumnRoleArg {
    Identifier,
    Verdict,
    Notes,
}

impl ColumnRoleArg {
    pub fn spec(self, name: &str) -> ColumnSpec {
        match self {
            Self::Identifier => ColumnSpec::identifier(name),
            Self::Verdict => ColumnSpec::verdict(name),
            Self::Notes => ColumnSpec::notes(name),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Xls,
    Html,
    All,
}

impl ExportFormatArg {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Csv => vec![ExportFormat::Csv],
            Self::Xls => vec![ExportFormat::Xls],
            Self::Html => vec![ExportFormat::Html],
            Self::All => ExportFormat::ALL.to_vec(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
