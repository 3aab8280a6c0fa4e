use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{ReportError, Result};

/// Read the first sheet of a workbook as text rows.
///
/// Rows keep their sheet positions: leading empty rows and columns that
/// calamine trims from the used range are restored, and trailing empty cells
/// are dropped so a row's length is its populated width.
pub fn read_first_sheet(path: &Path, date_format: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ReportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| ReportError::NoSheets(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| ReportError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for data_row in range.rows() {
        let mut cells: Vec<String> = vec![String::new(); col_offset];
        cells.extend(data_row.iter().map(|cell| cell_text(cell, date_format)));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    tracing::info!(path = %path.display(), sheet = %first, rows = rows.len(), "read input sheet");
    Ok(rows)
}

/// Render a cell the way the spreadsheet would show it as text.
fn cell_text(cell: &Data, date_format: &str) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string().to_uppercase(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
