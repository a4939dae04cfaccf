//! HTML exports: a spreadsheet-flavoured table and a standalone page.

use chrono::NaiveDate;
use quick_xml::escape::partial_escape;

use crate::export::{Encoder, ExportFormat};
use crate::projection::{NOTES_HEADER, ProjectedRow, Projection, STATUS_HEADER, VERDICT_HEADER};

/// Class marking technical-decline rows in both HTML outputs.
pub const HIGHLIGHT_CLASS: &str = "declinio-tecnico";

const SPREADSHEET_HEAD: &str = r#"<!DOCTYPE html>
<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:x="urn:schemas-microsoft-com:office:excel" xmlns="http://www.w3.org/TR/REC-html40">
<head>
    <meta charset="UTF-8">
    <meta name="ProgId" content="Excel.Sheet">
    <meta name="Generator" content="Microsoft Excel">
    <style>
        table { border-collapse: collapse; width: 100%; font-size: 11px; }
        th { background-color: #AEC6CF; color: #333; padding: 6px; text-align: left; border: 1px solid #ddd; font-weight: bold; }
        td { padding: 4px 6px; border: 1px solid #ddd; }
        .declinio-tecnico { background-color: #ffcccc !important; }
        .declinio-tecnico td { background-color: #ffcccc !important; color: #000000 !important; }
    </style>
</head>
<body>
    <table>
"#;

const SPREADSHEET_TAIL: &str = "    </table>\n</body>\n</html>\n";

const STANDALONE_STYLE: &str = r#"    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: Arial, sans-serif; margin: 10px; font-size: 11px; }
        h1 { font-size: 14px; margin-bottom: 8px; }
        table { border-collapse: collapse; width: 100%; font-size: 10px; }
        th { background-color: #AEC6CF; color: #333; padding: 4px 6px; text-align: left; border: 1px solid #ddd; font-size: 10px; white-space: nowrap; }
        td { padding: 3px 6px; border: 1px solid #ddd; font-size: 10px; }
        tr.declinio-tecnico { background-color: #ffcccc !important; }
        tr.declinio-tecnico td { color: #000 !important; font-weight: 500; }
        tr:hover { background-color: #f5f5f5; }
        tr.declinio-tecnico:hover { background-color: #ffaaaa !important; }
        .container { overflow-x: auto; }
    </style>
"#;

const STANDALONE_TAIL: &str = "    </table>\n    </div>\n</body>\n</html>\n";

/// HTML table served as `application/vnd.ms-excel`, so spreadsheet tools
/// open it with the highlight styling applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetHtmlEncoder;

impl Encoder for SpreadsheetHtmlEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xls
    }

    fn encode(&self, projection: &Projection<'_>) -> String {
        let width = projection.width();
        let mut out = String::from(SPREADSHEET_HEAD);
        push_header(
            &mut out,
            projection,
            &[VERDICT_HEADER, NOTES_HEADER, STATUS_HEADER],
        );
        out.push_str("        <tbody>\n");
        for row in &projection.rows {
            push_row(
                &mut out,
                row,
                width,
                &[row.verdict, row.notes, row.status.marker()],
            );
        }
        out.push_str("        </tbody>\n");
        out.push_str(SPREADSHEET_TAIL);
        out
    }
}

/// Self-contained page for browser viewing. Only matched rows are shown,
/// in original CSV order.
#[derive(Debug, Clone, Copy)]
pub struct StandaloneHtmlEncoder {
    /// Date printed in the page title.
    pub date: NaiveDate,
}

impl StandaloneHtmlEncoder {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Encoder for StandaloneHtmlEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn encode(&self, projection: &Projection<'_>) -> String {
        let width = projection.width();
        let mut out = String::from(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
             <title>Beneficiários Validados</title>\n",
        );
        out.push_str(STANDALONE_STYLE);
        out.push_str("</head>\n<body>\n    <h1>Beneficiários Validados - ");
        out.push_str(&self.date.format("%d/%m/%Y").to_string());
        out.push_str("</h1>\n    <div class=\"container\">\n    <table>\n");
        push_header(&mut out, projection, &[VERDICT_HEADER, NOTES_HEADER]);
        out.push_str("        <tbody>\n");
        for row in projection.matched_rows() {
            push_row(&mut out, row, width, &[row.verdict, row.notes]);
        }
        out.push_str("        </tbody>\n");
        out.push_str(STANDALONE_TAIL);
        out
    }
}

fn push_header(out: &mut String, projection: &Projection<'_>, added: &[&str]) {
    out.push_str("        <thead>\n            <tr>\n");
    let labels = projection
        .header
        .iter()
        .map(String::as_str)
        .chain(added.iter().copied());
    for label in labels {
        push_cell(out, "th", label);
    }
    out.push_str("            </tr>\n        </thead>\n");
}

fn push_row(out: &mut String, row: &ProjectedRow<'_>, width: usize, added: &[&str]) {
    if row.status.is_highlighted() {
        out.push_str("            <tr class=\"");
        out.push_str(HIGHLIGHT_CLASS);
        out.push_str("\">\n");
    } else {
        out.push_str("            <tr>\n");
    }
    for cell in row.padded_cells(width).chain(added.iter().copied()) {
        push_cell(out, "td", cell);
    }
    out.push_str("            </tr>\n");
}

fn push_cell(out: &mut String, tag: &str, text: &str) {
    out.push_str("                <");
    out.push_str(tag);
    out.push('>');
    out.push_str(&partial_escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}
