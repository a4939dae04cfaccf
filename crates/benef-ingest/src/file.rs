//! Local file read for uploaded CSVs.

use std::fs;
use std::path::Path;

use benef_model::LoadError;
use tracing::debug;

/// Whether `path` carries a `.csv` extension (any case).
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Decodes bytes as UTF-8, replacing invalid sequences, and strips one
/// leading byte-order mark.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    strip_bom(&text).to_string()
}

pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Reads a user-selected CSV file into text ready for tokenizing.
pub fn read_csv_file(path: &Path) -> Result<String, LoadError> {
    if !is_csv_path(path) {
        return Err(LoadError::NotCsv {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read CSV file");
    Ok(decode_text(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_csv_path(Path::new("dados.CSV")));
        assert!(is_csv_path(Path::new("dir/dados.csv")));
        assert!(!is_csv_path(Path::new("dados.xlsx")));
        assert!(!is_csv_path(Path::new("csv")));
    }

    #[test]
    fn decoding_strips_one_bom_and_replaces_invalid_bytes() {
        let mut bytes = "\u{feff}\u{feff}CPF".as_bytes().to_vec();
        bytes.push(0xff);
        let text = decode_text(&bytes);
        assert_eq!(text, "\u{feff}CPF\u{fffd}");
    }

    #[test]
    fn non_csv_is_rejected_before_reading() {
        let err = read_csv_file(Path::new("/nonexistent/planilha.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::NotCsv { .. }));
        assert_eq!(err.user_message(), "O arquivo deve ser um CSV");
    }
}
