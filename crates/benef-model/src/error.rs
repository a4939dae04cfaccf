//! Error taxonomy for loading, fetching and reconciling.
//!
//! `Display` renders an English message for logs. Each type also offers
//! `user_message()` with the status text portal users see.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::Side;

/// Failures of the authenticated sheet fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No identity token was available to send.
    #[error("no identity token available")]
    NotAuthenticated,

    /// The service rejected the identity token.
    #[error("identity token rejected by sheet service (HTTP 401)")]
    SessionExpired,

    /// The caller is not allowed to read this spreadsheet.
    #[error("access to spreadsheet denied (HTTP 403)")]
    Forbidden,

    /// The spreadsheet or the tab does not exist, or holds no data.
    #[error("spreadsheet or tab not found (HTTP 404)")]
    NotFound,

    /// Anything else: connection failures and unexpected statuses.
    #[error("sheet request failed{}: {message}", format_status(.status))]
    Transient {
        status: Option<u16>,
        message: String,
    },

    /// A file-backed sheet export could not be read.
    #[error("failed to read sheet export {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl FetchError {
    /// Status text shown to portal users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => {
                "Usuário não autenticado. Faça login para acessar a planilha.".to_string()
            }
            Self::SessionExpired => "Sessão expirada. Faça login novamente.".to_string(),
            Self::Forbidden => {
                "Acesso negado. Seu e-mail não está autorizado para acessar esta planilha."
                    .to_string()
            }
            Self::NotFound => "Planilha vazia ou aba não encontrada.".to_string(),
            Self::Transient { status, message } => {
                if !message.trim().is_empty() {
                    message.clone()
                } else if let Some(code) = status {
                    format!("Erro ao acessar a planilha. Status: {code}")
                } else {
                    "Erro ao acessar a planilha.".to_string()
                }
            }
            Self::FileRead { .. } => "Erro ao ler o arquivo da planilha.".to_string(),
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Failures that leave a side without records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The identifier column could not be resolved in the header.
    #[error(
        "column \"{column}\" not found in {side} header; available columns: {}{}",
        format_found_columns(.found),
        format_suggestion(.suggestion)
    )]
    MissingIdentifierColumn {
        side: Side,
        column: String,
        /// Header labels actually present, by position.
        found: Vec<String>,
        /// Closest header label, if any is reasonably similar.
        suggestion: Option<String>,
    },

    /// The selected file is not a CSV.
    #[error("{path} is not a CSV file")]
    NotCsv { path: PathBuf },

    /// The selected file could not be read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl LoadError {
    /// Status text shown to portal users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIdentifierColumn {
                side: Side::Sheet,
                column,
                found,
                ..
            } => format!(
                "Coluna \"{column}\" não encontrada no cabeçalho. Colunas disponíveis: {}",
                format_found_columns(found)
            ),
            Self::MissingIdentifierColumn {
                side: Side::Csv,
                column,
                found,
                ..
            } => format!(
                "Coluna \"{column}\" não encontrada no cabeçalho do CSV. Colunas encontradas: {}",
                format_found_columns(found)
            ),
            Self::NotCsv { .. } => "O arquivo deve ser um CSV".to_string(),
            Self::FileRead { .. } => "Erro ao ler o arquivo CSV".to_string(),
            Self::Fetch(err) => err.user_message(),
        }
    }
}

/// Lists header labels as `"label" (índice i)`, skipping blank labels.
pub fn format_found_columns(found: &[String]) -> String {
    let listed: Vec<String> = found
        .iter()
        .enumerate()
        .filter_map(|(idx, label)| {
            let label = label.trim();
            (!label.is_empty()).then(|| format!("\"{label}\" (índice {idx})"))
        })
        .collect();
    if listed.is_empty() {
        "nenhuma".to_string()
    } else {
        listed.join(", ")
    }
}

fn format_suggestion(suggestion: &Option<String>) -> String {
    suggestion
        .as_deref()
        .map(|label| format!(" (did you mean \"{label}\"?)"))
        .unwrap_or_default()
}

/// Reconciliation preconditions and the nothing-to-show outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("sheet records have not been loaded")]
    SheetNotLoaded,

    #[error("CSV records have not been loaded")]
    CsvNotLoaded,

    /// The join produced no matched record.
    #[error("no CSV identifier matched any sheet identifier")]
    NothingToShow,

    /// An export was requested before a successful reconciliation.
    #[error("no reconciliation result available")]
    NotReconciled,
}

impl ReconcileError {
    /// Status text shown to portal users.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SheetNotLoaded | Self::CsvNotLoaded => {
                "Por favor, carregue os dados da planilha e faça upload do CSV primeiro."
            }
            Self::NothingToShow => "Nenhum CPF correspondente encontrado entre a planilha e o CSV.",
            Self::NotReconciled => "Por favor, valide os beneficiários primeiro.",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn missing_column_lists_found_headers() {
        let err = LoadError::MissingIdentifierColumn {
            side: Side::Csv,
            column: "CPF".to_string(),
            found: vec!["Nome".to_string(), " ".to_string(), "Idade".to_string()],
            suggestion: None,
        };
        let text = err.user_message();
        assert!(text.contains("\"Nome\" (índice 0)"));
        assert!(text.contains("\"Idade\" (índice 2)"));
        assert!(!text.contains("índice 1"));
        assert_eq!(
            err.to_string(),
            "column \"CPF\" not found in CSV header; available columns: \
             \"Nome\" (índice 0), \"Idade\" (índice 2)"
        );
    }

    #[test]
    fn missing_column_with_no_headers_says_none() {
        let err = LoadError::MissingIdentifierColumn {
            side: Side::Sheet,
            column: "CPF".to_string(),
            found: Vec::new(),
            suggestion: Some("CPFs".to_string()),
        };
        assert!(err.user_message().ends_with("Colunas disponíveis: nenhuma"));
        assert!(err.to_string().ends_with("(did you mean \"CPFs\"?)"));
    }

    #[test]
    fn fetch_errors_map_to_distinct_messages() {
        let messages: Vec<String> = [
            FetchError::NotAuthenticated,
            FetchError::SessionExpired,
            FetchError::Forbidden,
            FetchError::NotFound,
        ]
        .iter()
        .map(FetchError::user_message)
        .collect();
        let unique: HashSet<&String> = messages.iter().collect();
        assert_eq!(unique.len(), messages.len());
        assert!(!FetchError::Forbidden.is_retryable());
    }

    #[test]
    fn transient_prefers_server_message() {
        let with_message = FetchError::Transient {
            status: Some(500),
            message: "Erro ao acessar a planilha".to_string(),
        };
        let without_message = FetchError::Transient {
            status: Some(502),
            message: String::new(),
        };
        assert_eq!(with_message.user_message(), "Erro ao acessar a planilha");
        assert_eq!(
            without_message.user_message(),
            "Erro ao acessar a planilha. Status: 502"
        );
        assert_eq!(
            with_message.to_string(),
            "sheet request failed (HTTP 500): Erro ao acessar a planilha"
        );
        assert!(with_message.is_retryable());
    }

    #[test]
    fn load_error_wraps_fetch_message() {
        let err = LoadError::from(FetchError::NotFound);
        assert_eq!(err.user_message(), "Planilha vazia ou aba não encontrada.");
    }
}
