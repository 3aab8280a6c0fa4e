use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::error::Result;
use crate::grid::{Cell, PivotGrid};
use crate::report::ReportSheet;

/// Build a workbook with one worksheet per sheet and save it to `path`.
///
/// Nothing touches the filesystem until every sheet has been laid out.
pub fn write_workbook(sheets: &[ReportSheet], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let merge_format = Format::new().set_align(FormatAlign::VerticalCenter);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_grid(worksheet, &sheet.grid, &header_format, &merge_format)?;
        tracing::debug!(sheet = %sheet.name, rows = sheet.grid.rows.len(), "sheet laid out");
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    tracing::info!(path = %path.display(), sheets = sheets.len(), "workbook saved");
    Ok(())
}

fn write_grid(
    worksheet: &mut Worksheet,
    grid: &PivotGrid,
    header_format: &Format,
    merge_format: &Format,
) -> Result<()> {
    for (col, title) in grid.header.iter().enumerate() {
        worksheet.write_string_with_format(0, column(col)?, title, header_format)?;
    }

    for (idx, cells) in grid.rows.iter().enumerate() {
        let row = data_row(idx)?;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, column(col)?, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, column(col)?, *n as f64)?;
                }
                Cell::Blank => {}
            }
        }
    }

    for span in &grid.merges {
        let value = grid
            .rows
            .get(span.start_row)
            .and_then(|cells| cells.get(span.column))
            .map(Cell::display)
            .unwrap_or_default();
        let col = column(span.column)?;
        worksheet.merge_range(
            data_row(span.start_row)?,
            col,
            data_row(span.end_row)?,
            col,
            &value,
            merge_format,
        )?;
    }

    Ok(())
}

fn column(idx: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Sheet row of a data row, below the header.
fn data_row(idx: usize) -> std::result::Result<u32, XlsxError> {
    u32::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)
}
