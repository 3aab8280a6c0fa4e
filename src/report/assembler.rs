use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::{ProgressSink, Report, ReportOutcome, ReportSheet, SheetSummary, View};
use crate::analysis::{customer_breakdown, daily_weekly, style_customer_pivot, style_pivot};
use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::grid::{self, PivotGrid};
use crate::record::{ingest, IngestProfile, SaleRecord};
use crate::xlsx::{read_first_sheet, write_workbook};

/// Records of one input table, ingested once per profile.
struct Ingested {
    standard: Vec<SaleRecord>,
    style: Vec<SaleRecord>,
}

impl Ingested {
    fn from_rows<R: AsRef<[String]>>(rows: &[R], config: &Config) -> Result<Self> {
        let standard = ingest(rows, &IngestProfile::standard(&config.input)?)?;
        let style = ingest(rows, &IngestProfile::style(&config.input)?)?;
        if standard.is_empty() || style.is_empty() {
            return Err(ReportError::EmptyInput);
        }
        tracing::info!(
            records = standard.len(),
            style_records = style.len(),
            "input ingested"
        );
        Ok(Self { standard, style })
    }

    fn grid(&self, view: View, config: &Config) -> Result<PivotGrid> {
        let thresholds = &config.thresholds;
        let labels = &config.labels;
        let grid = match view {
            View::Daily => {
                let stats = daily_weekly(&self.standard, thresholds.min_days)?;
                grid::daily_weekly_grid(&stats, labels)
            }
            View::Customers => {
                let breakdowns = customer_breakdown(&self.standard, thresholds.customer_day_min)?;
                grid::customer_grid(&breakdowns, labels)
            }
            View::StyleCustomers => {
                let pivot = style_customer_pivot(
                    &self.standard,
                    thresholds.style_customer_last_day_min,
                    thresholds.style_customer_total_min,
                )?;
                grid::style_customer_grid(&pivot, labels)
            }
            View::Style => {
                let pivot = style_pivot(&self.style, thresholds.style_latest_min)?;
                grid::style_grid(&pivot, labels)
            }
        };
        Ok(grid)
    }
}

/// Milestones reported before and after each view is built.
fn milestones(view: View) -> ((u8, &'static str), (u8, &'static str)) {
    match view {
        View::Daily => ((20, "daily sales: analyzing"), (25, "daily sales: done")),
        View::Customers => ((35, "customer sales: analyzing"), (40, "customer sales: done")),
        View::StyleCustomers => (
            (70, "style+customer sales: analyzing"),
            (75, "style+customer sales: done"),
        ),
        View::Style => ((90, "style sales: analyzing"), (95, "style sales: done")),
    }
}

/// Run the four analyses over raw sheet rows, stopping at the first failure.
pub fn assemble<R: AsRef<[String]>>(
    rows: &[R],
    config: &Config,
    run_date: NaiveDate,
    progress: &dyn ProgressSink,
) -> Result<Report> {
    let ingested = Ingested::from_rows(rows, config)?;

    let mut sheets = Vec::with_capacity(View::ALL.len());
    for view in View::ALL {
        let (before, after) = milestones(view);
        progress.notify(before.0, before.1);
        let grid = ingested.grid(view, config)?;
        progress.notify(after.0, after.1);
        sheets.push(ReportSheet {
            view,
            name: view.sheet_name(run_date, &config.labels),
            grid,
        });
    }

    Ok(Report { run_date, sheets })
}

/// Build the grid of a single view without producing a workbook.
pub fn build_view<R: AsRef<[String]>>(rows: &[R], config: &Config, view: View) -> Result<PivotGrid> {
    Ingested::from_rows(rows, config)?.grid(view, config)
}

/// `<dir>/<stem><suffix>.xlsx` next to the input file.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    input.with_file_name(format!("{stem}{suffix}.xlsx"))
}

/// Read `input`, build every view and save the workbook.
///
/// The output file is only written once all four views succeeded.
pub fn generate_report(
    input: &Path,
    output: Option<&Path>,
    config: &Config,
    run_date: NaiveDate,
    progress: &dyn ProgressSink,
) -> Result<ReportOutcome> {
    progress.notify(10, "reading input");
    let rows = read_first_sheet(input, &config.input.date_format)?;

    let report = assemble(&rows, config, run_date, progress)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, &config.output.suffix));
    write_workbook(&report.sheets, &output)?;
    progress.notify(100, "report saved");

    Ok(ReportOutcome {
        output,
        sheets: report.sheets.iter().map(SheetSummary::from).collect(),
    })
}
