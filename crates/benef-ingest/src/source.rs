//! Where sheet text comes from.
//!
//! [`SheetSource`] abstracts the authenticated tabular fetch. The HTTP
//! implementation talks to the sheet proxy service; the file implementation
//! reads a local export and is used offline and in tests.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use benef_model::{FetchError, SheetRequest};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::file::decode_text;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback message when an error response carries no readable body.
const UNKNOWN_ERROR: &str = "Erro desconhecido";

/// Supplies raw delimited text for a sheet request.
pub trait SheetSource {
    fn fetch(
        &self,
        request: &SheetRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// JSON body of the sheet proxy request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchBody {
    id_token: String,
    sheet_id: String,
    sheet_tab: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Maps a non-success status and its body onto a [`FetchError`].
///
/// 401, 403 and 404 have dedicated variants. Anything else is transient and
/// carries the server's `error` field when the body is JSON.
pub fn classify_status(status: u16, body: &str) -> FetchError {
    match status {
        401 => FetchError::SessionExpired,
        403 => FetchError::Forbidden,
        404 => FetchError::NotFound,
        _ => {
            let message = match serde_json::from_str::<ErrorBody>(body) {
                Ok(parsed) => parsed.error.unwrap_or_default(),
                Err(_) => UNKNOWN_ERROR.to_string(),
            };
            FetchError::Transient {
                status: Some(status),
                message,
            }
        }
    }
}

/// Sheet source backed by the authenticated proxy endpoint.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    endpoint: String,
}

impl HttpSheetSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("benef/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FetchError::Transient {
                status: None,
                message: format!("Erro ao preparar a conexão: {err}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SheetSource for HttpSheetSource {
    fn fetch(
        &self,
        request: &SheetRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let body = FetchBody {
            id_token: request.id_token.clone(),
            sheet_id: request.sheet_id.clone(),
            sheet_tab: request.sheet_tab.clone(),
        };
        async move {
            if body.id_token.trim().is_empty() {
                return Err(FetchError::NotAuthenticated);
            }
            debug!(
                endpoint = %self.endpoint,
                sheet_id = %body.sheet_id,
                sheet_tab = %body.sheet_tab,
                "requesting sheet"
            );
            let response = self
                .client
                .post(&self.endpoint)
                .header(ACCEPT, "text/csv")
                .json(&body)
                .send()
                .await
                .map_err(connection_error)?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let err = classify_status(status.as_u16(), &text);
                warn!(status = status.as_u16(), error = %err, "sheet request rejected");
                return Err(err);
            }
            let bytes = response.bytes().await.map_err(connection_error)?;
            Ok(decode_text(&bytes))
        }
    }
}

fn connection_error(err: reqwest::Error) -> FetchError {
    FetchError::Transient {
        status: err.status().map(|status| status.as_u16()),
        message: format!("Erro ao carregar dados: {err}"),
    }
}

/// Sheet source that reads a local CSV export of the sheet.
///
/// The request is ignored apart from logging; the same file answers every
/// tab.
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    path: PathBuf,
}

impl FileSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for FileSheetSource {
    fn fetch(
        &self,
        request: &SheetRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let tab = request.sheet_tab.clone();
        async move {
            debug!(path = %self.path.display(), sheet_tab = %tab, "reading sheet export");
            let bytes = std::fs::read(&self.path).map_err(|source| FetchError::FileRead {
                path: self.path.clone(),
                source,
            })?;
            Ok(decode_text(&bytes))
        }
    }
}
