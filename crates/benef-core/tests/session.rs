use std::fs;
use std::future::Future;
use std::path::PathBuf;

use benef_core::ValidationSession;
use benef_ingest::SheetSource;
use benef_model::{
    ColumnNames, FetchError, LoadError, LoadStatus, ReconcileError, SheetRequest,
};
use benef_report::ExportFormat;
use chrono::NaiveDate;
use tempfile::tempdir;

const SHEET: &str = "CPF;Parecer Técnico;Observações\n\
                     111.222.333-44;Aprovado;\n\
                     555.666.777-88;Declínio Técnico por idade;idade acima do limite\n\
                     222;Aprovado;revisado\n";

const CSV: &str = "NUM_CPF;NOME;TELEFONE;VAZIA\n\
                   11122233344;Ana;;\n\
                   55566677788;Bia;1199999;\n\
                   00000000000;Caio;;\n";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

fn loaded_session() -> ValidationSession {
    let mut session = ValidationSession::new(ColumnNames::default());
    session.load_sheet_text(SHEET).expect("load sheet");
    session.load_csv_text(CSV).expect("load csv");
    session
}

struct FakeSource {
    response: Result<&'static str, u16>,
}

impl SheetSource for FakeSource {
    fn fetch(
        &self,
        _request: &SheetRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let response = self.response;
        async move {
            match response {
                Ok(text) => Ok(text.to_string()),
                Err(403) => Err(FetchError::Forbidden),
                Err(status) => Err(FetchError::Transient {
                    status: Some(status),
                    message: String::new(),
                }),
            }
        }
    }
}

#[test]
fn reconcile_requires_both_sides() {
    let mut session = ValidationSession::default();
    assert_eq!(
        session.reconcile().unwrap_err(),
        ReconcileError::SheetNotLoaded
    );
    session.load_sheet_text(SHEET).expect("load sheet");
    assert_eq!(session.reconcile().unwrap_err(), ReconcileError::CsvNotLoaded);
    assert!(!session.is_ready());
}

#[test]
fn paging_walks_groups_and_clamps() {
    let mut session = loaded_session();
    let result = session.reconcile().expect("reconcile");
    assert_eq!(result.group_count(), 2);
    assert_eq!(result.unmatched_count(), 1);

    assert!(!session.previous());
    let first = session.current_view().expect("view");
    assert_eq!(first.verdict, "Aprovado");
    assert_eq!(first.counter, "1 / 2");
    assert!(!first.can_go_previous);
    assert!(first.can_go_next);

    assert!(session.next());
    assert!(!session.next());
    let last = session.current_view().expect("view");
    assert_eq!(last.counter, "2 / 2");
    assert!(!last.can_go_next);
    assert!(last.rows[0].highlighted);
}

#[test]
fn group_view_hides_empty_columns() {
    let mut session = loaded_session();
    session.reconcile().expect("reconcile");

    let first = session.current_view().expect("view");
    assert_eq!(first.columns, vec!["CPF", "NOME", "Observações"]);
    assert_eq!(first.rows[0].cells, vec!["11122233344", "Ana", "-"]);

    session.next();
    let second = session.current_view().expect("view");
    assert_eq!(
        second.columns,
        vec!["CPF", "NOME", "TELEFONE", "Observações"]
    );
    assert_eq!(
        second.rows[0].cells,
        vec!["55566677788", "Bia", "1199999", "idade acima do limite"]
    );
}

#[test]
fn nothing_to_show_leaves_empty_result_and_blocks_export() {
    let mut session = ValidationSession::default();
    session
        .load_sheet_text("CPF;Parecer Técnico\n999;Aprovado\n")
        .expect("load sheet");
    session.load_csv_text("NUM_CPF\n111\n").expect("load csv");

    assert_eq!(session.reconcile().unwrap_err(), ReconcileError::NothingToShow);
    let result = session.result().expect("empty result stored");
    assert!(result.is_empty());
    assert_eq!(result.unmatched_count(), 1);
    assert!(session.current_view().is_none());
    assert_eq!(
        session.export(ExportFormat::Csv, date()).unwrap_err(),
        ReconcileError::NotReconciled
    );
}

#[test]
fn failed_reload_keeps_previous_records() {
    let mut session = loaded_session();
    let err = session.load_csv_text("Nome,Idade\nAna,30\n").unwrap_err();
    assert!(matches!(err, LoadError::MissingIdentifierColumn { .. }));
    assert_eq!(session.csv().map(|csv| csv.len()), Some(3));
    assert!(session.reconcile().is_ok());
}

#[test]
fn successful_reload_discards_result() {
    let mut session = loaded_session();
    session.reconcile().expect("reconcile");
    let status = session
        .load_csv_text("NUM_CPF;NOME\n;sem cpf\n")
        .expect("load csv");
    assert_eq!(status, LoadStatus::Empty);
    assert!(session.result().is_none());
    assert_eq!(
        session.export(ExportFormat::Html, date()).unwrap_err(),
        ReconcileError::NotReconciled
    );
}

#[test]
fn export_flags_declines_and_unmatched_rows() {
    let mut session = loaded_session();
    session.reconcile().expect("reconcile");
    let artifact = session.export(ExportFormat::Csv, date()).expect("export");
    let lines: Vec<&str> = artifact.body.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "11122233344;Ana;;;Aprovado;;OK");
    assert_eq!(
        lines[2],
        "55566677788;Bia;1199999;;Declínio Técnico por idade;idade acima do limite;DECLÍNIO TÉCNICO"
    );
    assert_eq!(lines[3], "00000000000;Caio;;;;;NÃO VALIDADO");

    let page = session.export(ExportFormat::Xls, date()).expect("export");
    assert_eq!(page.body.matches("<tr class=\"declinio-tecnico\">").count(), 1);
}

#[tokio::test]
async fn sheet_loads_through_source_and_survives_fetch_failure() {
    let mut session = ValidationSession::default();
    let request = SheetRequest::new("token", "Dados");
    let status = session
        .load_sheet(&FakeSource { response: Ok(SHEET) }, &request)
        .await
        .expect("load sheet");
    assert_eq!(status, LoadStatus::Loaded { identifiers: 3 });

    let err = session
        .load_sheet(&FakeSource { response: Err(403) }, &request)
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "Acesso negado. Seu e-mail não está autorizado para acessar esta planilha."
    );
    assert_eq!(session.sheet().map(|sheet| sheet.len()), Some(3));
}

#[test]
fn csv_file_must_have_csv_extension() {
    let dir = tempdir().expect("create temp dir");
    let good: PathBuf = dir.path().join("beneficiarios.csv");
    let bad: PathBuf = dir.path().join("beneficiarios.txt");
    fs::write(&good, CSV).expect("write csv");
    fs::write(&bad, CSV).expect("write txt");

    let mut session = ValidationSession::default();
    let err = session.load_csv_file(&bad).unwrap_err();
    assert!(matches!(err, LoadError::NotCsv { .. }));
    assert!(session.csv().is_none());

    let status = session.load_csv_file(&good).expect("load csv file");
    assert_eq!(status, LoadStatus::Loaded { identifiers: 3 });
}
