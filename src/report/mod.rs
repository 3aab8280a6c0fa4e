mod assembler;
mod progress;

pub use assembler::{assemble, build_view, default_output_path, generate_report};
pub use progress::{LogProgress, ProgressSink};

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Labels;
use crate::grid::PivotGrid;

/// The four report views, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Daily and 7-day sales per product
    Daily,
    /// Latest-day sales per product and customer
    Customers,
    /// Product × customer quantities per day
    StyleCustomers,
    /// Product quantities per day
    Style,
}

impl View {
    pub const ALL: [View; 4] = [View::Daily, View::Customers, View::StyleCustomers, View::Style];

    /// Worksheet name for a run on `run_date`: the latest-day views carry
    /// month and day, the range pivots only the month.
    pub fn sheet_name(self, run_date: NaiveDate, labels: &Labels) -> String {
        match self {
            View::Daily => format!("{} {}", run_date.format("%m.%d"), labels.daily_sheet),
            View::Customers => format!("{} {}", run_date.format("%m.%d"), labels.customer_sheet),
            View::StyleCustomers => {
                format!("{} {}", run_date.format("%m"), labels.style_customer_sheet)
            }
            View::Style => format!("{} {}", run_date.format("%m"), labels.style_sheet),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSheet {
    pub view: View,
    pub name: String,
    pub grid: PivotGrid,
}

/// All sheets of one run, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub run_date: NaiveDate,
    pub sheets: Vec<ReportSheet>,
}

/// What a completed run produced; the shell hands `output` on for saving.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub output: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

impl From<&ReportSheet> for SheetSummary {
    fn from(sheet: &ReportSheet) -> Self {
        Self {
            name: sheet.name.clone(),
            rows: sheet.grid.rows.len(),
            columns: sheet.grid.width(),
        }
    }
}
