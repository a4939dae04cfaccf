//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use benef_core::{GroupView, ValidationSession};
use benef_ingest::{FileSheetSource, HttpSheetSource, parse, read_csv_file};
use benef_map::{resolve_column, suggest_column};
use benef_model::{
    FetchError, LoadError, LoadStatus, ReconcileError, ReconciliationResult, Side,
};
use chrono::{Local, NaiveDate};
use tracing::{error, info, info_span};

use crate::cli::{InspectArgs, ValidateArgs};
use crate::types::{ColumnReport, InspectReport, ValidateOutcome, ValidateReport};

/// Loads both sides, reconciles them and writes the requested exports.
///
/// Load failures are errors carrying the user-facing status text as their
/// outermost context. A reconciliation without matches is an outcome, not
/// an error.
pub async fn run_validate(args: &ValidateArgs) -> Result<ValidateOutcome> {
    let mut session = ValidationSession::new(args.column_names());

    let sheet_status = load_sheet(&mut session, args).await?;
    let csv_status = session
        .load_csv_file(&args.csv)
        .map_err(|err| load_failure(Side::Csv, err))?;

    let _span = info_span!("validate", csv = %args.csv.display()).entered();
    let matched = match session.reconcile() {
        Ok(_) => true,
        Err(ReconcileError::NothingToShow) => false,
        Err(err) => return Err(anyhow::Error::new(err).context("reconcile")),
    };
    let summary = session
        .result()
        .map(ReconciliationResult::summary)
        .context("reconciliation result missing")?;
    let groups = collect_groups(&mut session);

    let mut report = ValidateReport {
        sheet_status,
        csv_status,
        summary,
        groups,
        exports: Vec::new(),
    };
    if !matched {
        return Ok(ValidateOutcome::NothingToShow(report));
    }
    if !args.no_export {
        let date = args.date.unwrap_or_else(|| Local::now().date_naive());
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        report.exports = write_exports(&session, args, &output_dir, date)?;
    }
    Ok(ValidateOutcome::Reconciled(report))
}

async fn load_sheet(session: &mut ValidationSession, args: &ValidateArgs) -> Result<LoadStatus> {
    let request = args.sheet_request();
    let loaded = if let Some(path) = &args.sheet_file {
        session
            .load_sheet(&FileSheetSource::new(path), &request)
            .await
    } else if let Some(endpoint) = &args.endpoint {
        let source = HttpSheetSource::new(endpoint.as_str()).map_err(fetch_setup_failure)?;
        session.load_sheet(&source, &request).await
    } else {
        bail!("either --sheet-file or --endpoint is required");
    };
    loaded.map_err(|err| load_failure(Side::Sheet, err))
}

/// Pages through every group of the stored result.
fn collect_groups(session: &mut ValidationSession) -> Vec<GroupView> {
    let mut groups = Vec::new();
    while session.previous() {}
    if let Some(view) = session.current_view() {
        groups.push(view);
    }
    while session.next() {
        if let Some(view) = session.current_view() {
            groups.push(view);
        }
    }
    groups
}

fn write_exports(
    session: &ValidationSession,
    args: &ValidateArgs,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let mut written = Vec::new();
    for format in args.format.formats() {
        let artifact = session
            .export(format, date)
            .with_context(|| format!("encode {format} export"))?;
        let path = output_dir.join(&artifact.file_name);
        fs::write(&path, artifact.body.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        info!(
            format = %format,
            path = %path.display(),
            content_type = artifact.content_type,
            "export written"
        );
        written.push(path);
    }
    Ok(written)
}

/// Tokenizes a CSV file and optionally resolves one column against its header.
pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let _span = info_span!("inspect", file = %args.file.display()).entered();
    let text = read_csv_file(&args.file).map_err(|err| load_failure(Side::Csv, err))?;
    let table = parse(&text);
    let header = table.header().cloned().unwrap_or_default();

    let column = args.column.as_deref().map(|name| {
        let resolved = resolve_column(&header, &args.role.spec(name));
        let suggestion = if resolved.is_none() {
            suggest_column(&header, name)
        } else {
            None
        };
        ColumnReport {
            name: name.to_string(),
            resolved,
            suggestion,
        }
    });

    Ok(InspectReport {
        path: args.file.clone(),
        separator: table.separator(),
        header: header.cells().to_vec(),
        data_rows: table.data_rows().count(),
        column,
    })
}

/// Portuguese label for a side, matching the portal's status boxes.
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::Sheet => "Planilha",
        Side::Csv => "CSV",
    }
}

fn load_failure(side: Side, err: LoadError) -> anyhow::Error {
    error!(side = %side, error = %err, "load failed");
    let message = format!("{}: {}", side_label(side), err.user_message());
    anyhow::Error::new(err).context(message)
}

fn fetch_setup_failure(err: FetchError) -> anyhow::Error {
    error!(error = %err, "sheet client setup failed");
    let message = format!("{}: {}", side_label(Side::Sheet), err.user_message());
    anyhow::Error::new(err).context(message)
}
