use std::path::PathBuf;

use benef_core::GroupView;
use benef_map::ColumnMatch;
use benef_model::{LoadStatus, ResultSummary, Separator};

/// Outcome of `benef validate` once both sides loaded.
#[derive(Debug)]
pub enum ValidateOutcome {
    Reconciled(ValidateReport),
    /// No CSV record matched the sheet; nothing was exported.
    NothingToShow(ValidateReport),
}

impl ValidateOutcome {
    pub fn report(&self) -> &ValidateReport {
        match self {
            Self::Reconciled(report) | Self::NothingToShow(report) => report,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Reconciled(_) => 0,
            Self::NothingToShow(_) => 2,
        }
    }
}

#[derive(Debug)]
pub struct ValidateReport {
    pub sheet_status: LoadStatus,
    pub csv_status: LoadStatus,
    pub summary: ResultSummary,
    /// One page per verdict group, in group order.
    pub groups: Vec<GroupView>,
    pub exports: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InspectReport {
    pub path: PathBuf,
    pub separator: Separator,
    pub header: Vec<String>,
    pub data_rows: usize,
    pub column: Option<ColumnReport>,
}

#[derive(Debug)]
pub struct ColumnReport {
    pub name: String,
    pub resolved: Option<ColumnMatch>,
    pub suggestion: Option<String>,
}
