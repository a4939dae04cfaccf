use std::fs;
use std::future::Future;
use std::path::PathBuf;

use benef_ingest::{
    FileSheetSource, SheetSource, load_csv_text, load_sheet, read_csv_file,
};
use benef_model::{ColumnNames, FetchError, LoadError, LoadStatus, SheetRequest, Side};
use tempfile::TempDir;

fn temp_file(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    (dir, path)
}

/// Sheet source answering with a fixed outcome.
struct FakeSource {
    outcome: Result<&'static str, u16>,
}

impl SheetSource for FakeSource {
    fn fetch(
        &self,
        _request: &SheetRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let outcome = self.outcome;
        async move {
            match outcome {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(benef_ingest::classify_status(status, "")),
            }
        }
    }
}

#[tokio::test]
async fn sheet_load_through_source() {
    let source = FakeSource {
        outcome: Ok("CPF,Parecer Tecnico (final),OBSERVACOES\n111,Aprovado,nota\n"),
    };
    let request = SheetRequest::new("token", "Dados");
    let set = load_sheet(&source, &request, &ColumnNames::default())
        .await
        .expect("load");
    assert_eq!(set.columns().verdict, Some(1));
    assert_eq!(set.columns().notes, Some(2));
    assert_eq!(set.records()[0].verdict, "Aprovado");
    assert_eq!(set.status(), LoadStatus::Loaded { identifiers: 1 });
}

#[tokio::test]
async fn fetch_failures_surface_as_load_errors() {
    let request = SheetRequest::new("token", "Dados");
    for (status, expected) in [
        (401, "Sessão expirada. Faça login novamente."),
        (404, "Planilha vazia ou aba não encontrada."),
    ] {
        let source = FakeSource {
            outcome: Err(status),
        };
        let err = load_sheet(&source, &request, &ColumnNames::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
        assert_eq!(err.user_message(), expected);
    }
}

#[tokio::test]
async fn file_sheet_source_reads_export() {
    let (_dir, path) = temp_file("planilha.csv", "CPF;Parecer Técnico\n999;Aprovado\n".as_bytes());
    let source = FileSheetSource::new(&path);
    let set = load_sheet(&source, &SheetRequest::new("", ""), &ColumnNames::default())
        .await
        .expect("load");
    assert_eq!(set.len(), 1);
    assert_eq!(set.side(), Side::Sheet);
}

#[tokio::test]
async fn missing_sheet_export_is_a_fetch_error() {
    let dir = TempDir::new().expect("create temp dir");
    let source = FileSheetSource::new(dir.path().join("planilha.csv"));
    let err = load_sheet(&source, &SheetRequest::new("", ""), &ColumnNames::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Fetch(FetchError::FileRead { .. })));
}

#[test]
fn csv_file_with_bom_and_crlf() {
    let mut bytes = vec![0xef, 0xbb, 0xbf];
    bytes.extend_from_slice(b"NUM_CPF;NOME\r\n111.222.333-44;Ana\r\n");
    let (_dir, path) = temp_file("beneficiarios.csv", &bytes);
    let text = read_csv_file(&path).expect("read");
    let set = load_csv_text(&text, "NUM_CPF").expect("load");
    assert_eq!(set.header().cell(0), "NUM_CPF");
    assert_eq!(set.records()[0].identifier, "111.222.333-44");
}

#[test]
fn missing_identifier_lists_found_columns() {
    let err = load_csv_text("Nome,Idade\nAna,30\n", "CPF").unwrap_err();
    let message = err.user_message();
    assert!(message.contains("\"Nome\" (índice 0)"), "{message}");
    assert!(message.contains("\"Idade\" (índice 1)"), "{message}");
    match err {
        LoadError::MissingIdentifierColumn {
            side, found, suggestion, ..
        } => {
            assert_eq!(side, Side::Csv);
            assert_eq!(found, vec!["Nome".to_string(), "Idade".to_string()]);
            assert_eq!(suggestion, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn close_header_is_suggested() {
    let err = load_csv_text("NUM_CPFS,Nome\n1,Ana\n", "NUM_CPF").unwrap_err();
    assert!(err.to_string().contains("did you mean \"NUM_CPFS\""));
}
