//! Spreadsheet input and output.

mod reader;
mod writer;

pub use reader::read_first_sheet;
pub use writer::write_workbook;
