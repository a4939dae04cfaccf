//! Semicolon-delimited export.

use crate::export::{Encoder, ExportFormat};
use crate::projection::{NOTES_HEADER, Projection, STATUS_HEADER, VERDICT_HEADER};

/// Output separator, independent of the separator the input was read with.
pub const OUTPUT_SEPARATOR: char = ';';

/// Byte-order mark written first so spreadsheet tools pick UTF-8.
const BOM: char = '\u{feff}';

/// Every CSV data row in original order with verdict, notes and status
/// appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedEncoder;

impl Encoder for DelimitedEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn encode(&self, projection: &Projection<'_>) -> String {
        let width = projection.width();
        let mut out = String::new();
        out.push(BOM);

        let header = projection
            .header
            .iter()
            .map(String::as_str)
            .chain([VERDICT_HEADER, NOTES_HEADER, STATUS_HEADER]);
        push_line(&mut out, header);

        for row in &projection.rows {
            let cells = row
                .padded_cells(width)
                .chain([row.verdict, row.notes, row.status.marker()]);
            push_line(&mut out, cells);
        }
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(OUTPUT_SEPARATOR);
        }
        push_field(out, cell);
    }
    out.push('\n');
}

/// Whether a field must be wrapped in quotes.
pub fn needs_quoting(field: &str) -> bool {
    field.contains([OUTPUT_SEPARATOR, ',', '\n', '"'])
}

fn push_field(out: &mut String, field: &str) {
    if needs_quoting(field) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
