//! Lectura de workbooks (`.xlsx`) con `calamine`.
//!
//! Sólo lectura: los workbooks se capturan copiándolos tal cual, nunca se
//! reescriben.
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::debug;
use regress_core::constants::{DATA_SHEET, META_SHEET, UNNAMED_INDEX_PREFIX};
use regress_core::{RawArtifact, RawTable, Value};

use crate::error::CodecError;

/// Encabezado como texto. Los años llegan como número (`2010.0`) y se
/// escriben como entero; un encabezado vacío es índice sin nombre.
fn header_label(cell: &Data, idx: usize) -> String {
    let label = match cell {
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    };
    if label.is_empty() { format!("{UNNAMED_INDEX_PREFIX}{idx}") } else { label }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::text_cell(s),
        Data::Empty | Data::Error(_) => Value::Missing,
        other => Value::Text(other.to_string()),
    }
}

fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return RawTable::default();
    };
    let mut table = RawTable::new(header.iter().enumerate().map(|(i, c)| header_label(c, i)).collect());
    for row in rows {
        table.push_row(row.iter().map(cell_value).collect());
    }
    table
}

/// Lee la hoja `sheet`. `None` si el workbook no la tiene.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Option<RawTable>, CodecError> {
    let mut wb = open_workbook_auto(path).map_err(|e| CodecError::workbook(path, e))?;
    if !wb.sheet_names().iter().any(|s| s == sheet) {
        return Ok(None);
    }
    let range = wb.worksheet_range(sheet).map_err(|e| CodecError::workbook(path, e))?;
    let table = range_to_table(&range);
    debug!("read sheet '{sheet}' ({} rows) from {}", table.rows.len(), path.display());
    Ok(Some(table))
}

/// Lee la hoja `sheet` y falla si no existe.
pub fn require_sheet(path: &Path, sheet: &str) -> Result<RawTable, CodecError> {
    read_sheet(path, sheet)?.ok_or_else(|| CodecError::MissingSheet { path: path.to_path_buf(), sheet: sheet.to_string() })
}

/// Primera hoja del workbook, sea cual sea su nombre.
pub fn read_first_sheet(path: &Path) -> Result<RawTable, CodecError> {
    let mut wb = open_workbook_auto(path).map_err(|e| CodecError::workbook(path, e))?;
    let Some(first) = wb.sheet_names().first().cloned() else {
        return Err(CodecError::EmptyWorkbook { path: path.to_path_buf() });
    };
    let range = wb.worksheet_range(&first).map_err(|e| CodecError::workbook(path, e))?;
    Ok(range_to_table(&range))
}

/// Workbook IAMC: hoja `data` obligatoria y `meta` opcional.
pub fn read_iamc_workbook(path: &Path) -> Result<RawArtifact, CodecError> {
    let data = require_sheet(path, DATA_SHEET)?;
    Ok(RawArtifact { data, meta: read_sheet(path, META_SHEET)? })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_headers_become_integers() {
        assert_eq!(header_label(&Data::Float(2010.0), 5), "2010");
        assert_eq!(header_label(&Data::Int(2020), 6), "2020");
        assert_eq!(header_label(&Data::String("Model".into()), 0), "Model");
        assert_eq!(header_label(&Data::Empty, 0), "Unnamed: 0");
    }

    #[test]
    fn cells_map_to_neutral_values() {
        assert_eq!(cell_value(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(cell_value(&Data::Float(f64::NAN)), Value::Missing);
        assert_eq!(cell_value(&Data::Bool(false)), Value::Bool(false));
        assert_eq!(cell_value(&Data::String("C1".into())), Value::from("C1"));
        assert_eq!(cell_value(&Data::Empty), Value::Missing);
        assert_eq!(cell_value(&Data::String("1.50".into())), Value::from("1.50"));
    }

    #[test]
    fn missing_workbook_is_codec_error() {
        assert!(matches!(read_first_sheet(Path::new("/nope/book.xlsx")), Err(CodecError::Workbook { .. })));
    }
}
