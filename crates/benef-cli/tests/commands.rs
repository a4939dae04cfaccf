use std::fs;
use std::path::{Path, PathBuf};

use benef_cli::cli::{Cli, ColumnRoleArg, Command, ExportFormatArg, InspectArgs, ValidateArgs};
use benef_cli::commands::{run_inspect, run_validate};
use benef_cli::types::ValidateOutcome;
use benef_map::RuleKind;
use benef_model::{LoadStatus, Separator};
use clap::Parser;
use tempfile::TempDir;

const SHEET: &str = "CPF,Parecer Técnico,Observações\n\
                     111.222.333-44,Aprovado,\n\
                     555.666.777-88,Declínio Técnico por idade,acima do limite\n";

const CSV: &str = "NUM_CPF;NOME\n11122233344;Ana\n55566677788;Bia\n00000000000;Caio\n";

fn utf8(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

fn write_inputs(dir: &TempDir, csv_text: &str) -> (PathBuf, PathBuf) {
    let sheet = dir.path().join("planilha.csv");
    let csv = dir.path().join("dados.csv");
    fs::write(&sheet, SHEET).expect("write sheet");
    fs::write(&csv, csv_text).expect("write csv");
    (sheet, csv)
}

fn validate_args(argv: &[&str]) -> ValidateArgs {
    let mut full = vec!["benef", "validate"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("parse").command {
        Command::Validate(args) => args,
        Command::Inspect(_) => panic!("expected validate"),
    }
}

fn inspect_args(argv: &[&str]) -> InspectArgs {
    let mut full = vec!["benef", "inspect"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("parse").command {
        Command::Inspect(args) => args,
        Command::Validate(_) => panic!("expected inspect"),
    }
}

#[test]
fn validate_defaults_match_portal() {
    let args = validate_args(&["--csv", "dados.csv", "--sheet-file", "planilha.csv"]);
    assert_eq!(args.format, ExportFormatArg::All);
    assert_eq!(args.format.formats().len(), 3);
    let names = args.column_names();
    assert_eq!(names.sheet_identifier, "CPF");
    assert_eq!(names.csv_identifier, "NUM_CPF");
    assert_eq!(names.verdict, "Parecer Técnico");
    let request = args.sheet_request();
    assert_eq!(request.sheet_tab, "Dados");
    assert!(!args.no_export);
}

#[test]
fn blank_column_overrides_fall_back() {
    let args = validate_args(&[
        "--csv",
        "dados.csv",
        "--csv-column",
        "  ",
        "--sheet-tab",
        "Respostas",
        "--date",
        "2024-03-05",
    ]);
    assert_eq!(args.column_names().csv_identifier, "NUM_CPF");
    assert_eq!(args.sheet_request().sheet_tab, "Respostas");
    assert_eq!(args.date.map(|d| d.to_string()).as_deref(), Some("2024-03-05"));
}

#[test]
fn unknown_format_is_rejected() {
    let parsed = Cli::try_parse_from(["benef", "validate", "--csv", "a.csv", "--format", "pdf"]);
    assert!(parsed.is_err());
}

#[tokio::test]
async fn validate_writes_every_export() {
    let dir = TempDir::new().expect("create temp dir");
    let (sheet, csv) = write_inputs(&dir, CSV);
    let out = dir.path().join("out");

    let args = validate_args(&[
        "--csv",
        utf8(&csv),
        "--sheet-file",
        utf8(&sheet),
        "--output-dir",
        utf8(&out),
        "--date",
        "2024-03-05",
    ]);
    let outcome = run_validate(&args).await.expect("validate");
    assert_eq!(outcome.exit_code(), 0);
    let report = outcome.report();
    assert_eq!(report.sheet_status, LoadStatus::Loaded { identifiers: 2 });
    assert_eq!(report.csv_status, LoadStatus::Loaded { identifiers: 3 });
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[1].counter, "2 / 2");
    assert_eq!(report.summary.unmatched_csv_records, 1);

    let names: Vec<String> = report
        .exports
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "beneficiarios_validados_2024-03-05.csv",
            "beneficiarios_validados_formatado_2024-03-05.xls",
            "beneficiarios_validados_colorido_2024-03-05.html",
        ]
    );
    let written = fs::read_to_string(&report.exports[0]).expect("read export");
    let body = written
        .strip_prefix('\u{feff}')
        .expect("export starts with a byte-order mark");
    insta::assert_snapshot!(body, @r"
    NUM_CPF;NOME;Parecer Técnico;Observações;Status Validação
    11122233344;Ana;Aprovado;;OK
    55566677788;Bia;Declínio Técnico por idade;acima do limite;DECLÍNIO TÉCNICO
    00000000000;Caio;;;NÃO VALIDADO
    ");
}

#[tokio::test]
async fn disjoint_inputs_exit_with_nothing_to_show() {
    let dir = TempDir::new().expect("create temp dir");
    let (sheet, csv) = write_inputs(&dir, "NUM_CPF\n99999999999\n");
    let out = dir.path().join("out");

    let args = validate_args(&[
        "--csv",
        utf8(&csv),
        "--sheet-file",
        utf8(&sheet),
        "--output-dir",
        utf8(&out),
    ]);
    let outcome = run_validate(&args).await.expect("validate");
    assert!(matches!(outcome, ValidateOutcome::NothingToShow(_)));
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.report().exports.is_empty());
    assert!(!out.exists());
}

#[tokio::test]
async fn missing_column_reports_portal_message() {
    let dir = TempDir::new().expect("create temp dir");
    let (sheet, csv) = write_inputs(&dir, "Nome,Idade\nAna,30\n");

    let args = validate_args(&[
        "--csv",
        utf8(&csv),
        "--sheet-file",
        utf8(&sheet),
        "--no-export",
    ]);
    let err = run_validate(&args).await.unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("CSV: "), "{message}");
    assert!(message.contains("NUM_CPF"), "{message}");
}

#[tokio::test]
async fn sheet_source_is_required() {
    let args = validate_args(&["--csv", "dados.csv"]);
    if args.endpoint.is_some() {
        return;
    }
    let err = run_validate(&args).await.unwrap_err();
    assert!(err.to_string().contains("--sheet-file"));
}

#[test]
fn inspect_reports_separator_and_resolution() {
    let dir = TempDir::new().expect("create temp dir");
    let file = dir.path().join("dados.csv");
    fs::write(&file, "\u{feff}Nome;Num Cpf;Cidade\nAna;111;Rio\n\nBia;222;SP\n").expect("write");

    let args = inspect_args(&[utf8(&file), "--column", "NUM_CPF"]);
    let report = run_inspect(&args).expect("inspect");
    assert_eq!(report.separator, Separator::Semicolon);
    assert_eq!(report.header, vec!["Nome", "Num Cpf", "Cidade"]);
    assert_eq!(report.data_rows, 2);
    let column = report.column.expect("column report");
    let found = column.resolved.expect("resolved");
    assert_eq!(found.index, 1);
    assert_eq!(found.rule, RuleKind::Loose);
    assert!(column.suggestion.is_none());
}

#[test]
fn inspect_verdict_role_uses_substring_fallback() {
    let dir = TempDir::new().expect("create temp dir");
    let file = dir.path().join("planilha.csv");
    fs::write(&file, "CPF,PARECER DO TECNICO RESPONSAVEL\n1,Aprovado\n").expect("write");

    let args = inspect_args(&[
        utf8(&file),
        "--column",
        "Parecer Técnico",
        "--role",
        "verdict",
    ]);
    assert_eq!(args.role, ColumnRoleArg::Verdict);
    let report = run_inspect(&args).expect("inspect");
    let found = report
        .column
        .and_then(|column| column.resolved)
        .expect("resolved");
    assert_eq!(found.index, 1);
    assert_eq!(found.rule, RuleKind::Substring);
}

#[test]
fn inspect_rejects_non_csv_files() {
    let args = inspect_args(&["planilha.xlsx"]);
    let err = run_inspect(&args).unwrap_err();
    assert_eq!(err.to_string(), "CSV: O arquivo deve ser um CSV");
}
