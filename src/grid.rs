//! Rectangular sheet model built from aggregated views.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{CustomerBreakdown, DailyWeeklyStat, StyleCustomerPivot, StylePivot};
use crate::config::Labels;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(i64),
    Blank,
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Blank => String::new(),
        }
    }
}

/// Vertical run of data rows sharing a group key in `column`.
///
/// Rows are zero-based indexes into [`PivotGrid::rows`], both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeSpan {
    pub column: usize,
    pub start_row: usize,
    pub end_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub merges: Vec<MergeSpan>,
}

impl PivotGrid {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

fn day_headers<'a>(days: &'a [NaiveDate], format: &str) -> impl Iterator<Item = String> + 'a {
    let format = format.to_string();
    days.iter().map(move |day| day.format(&format).to_string())
}

fn quantity_cell(quantity: Option<&i64>) -> Cell {
    quantity.map_or(Cell::Blank, |q| Cell::Number(*q))
}

/// Record a span for the rows `start..end` when it covers more than one row.
fn push_span(merges: &mut Vec<MergeSpan>, column: usize, start: usize, end: usize) {
    if end > start + 1 {
        merges.push(MergeSpan {
            column,
            start_row: start,
            end_row: end - 1,
        });
    }
}

pub fn daily_weekly_grid(stats: &[DailyWeeklyStat], labels: &Labels) -> PivotGrid {
    PivotGrid {
        header: vec![
            labels.product.clone(),
            labels.daily_sales.clone(),
            labels.weekly_sales.clone(),
            labels.weekly_compare.clone(),
        ],
        rows: stats
            .iter()
            .map(|s| {
                vec![
                    Cell::Text(s.product_id.clone()),
                    Cell::Number(s.daily_sales),
                    Cell::Number(s.weekly_sales),
                    Cell::Number(s.weekly_compare),
                ]
            })
            .collect(),
        merges: Vec::new(),
    }
}

pub fn customer_grid(breakdowns: &[CustomerBreakdown], labels: &Labels) -> PivotGrid {
    let mut rows = Vec::new();
    let mut merges = Vec::new();

    for breakdown in breakdowns {
        let start = rows.len();
        for entry in &breakdown.customers {
            rows.push(vec![
                Cell::Text(breakdown.product_id.clone()),
                Cell::Text(entry.customer.clone()),
                Cell::Number(entry.quantity),
            ]);
        }
        push_span(&mut merges, 0, start, rows.len());
    }

    PivotGrid {
        header: vec![
            labels.product.clone(),
            labels.customer.clone(),
            labels.quantity.clone(),
        ],
        rows,
        merges,
    }
}

pub fn style_grid(pivot: &StylePivot, labels: &Labels) -> PivotGrid {
    let mut header = vec![labels.product.clone()];
    header.extend(day_headers(&pivot.days, &labels.day_header_format));
    header.push(labels.total.clone());

    let rows = pivot
        .rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(pivot.days.len() + 2);
            cells.push(Cell::Text(row.product_id.clone()));
            cells.extend(pivot.days.iter().map(|day| quantity_cell(row.daily.get(day))));
            cells.push(Cell::Number(row.total_sales));
            cells
        })
        .collect();

    PivotGrid {
        header,
        rows,
        merges: Vec::new(),
    }
}

pub fn style_customer_grid(pivot: &StyleCustomerPivot, labels: &Labels) -> PivotGrid {
    let mut header = vec![labels.product.clone(), labels.customer.clone()];
    header.extend(day_headers(&pivot.days, &labels.day_header_format));
    header.push(labels.total.clone());

    let mut rows = Vec::new();
    let mut merges = Vec::new();
    for group in &pivot.groups {
        let start = rows.len();
        for customer in &group.customers {
            let mut cells = Vec::with_capacity(pivot.days.len() + 3);
            cells.push(Cell::Text(group.product_id.clone()));
            cells.push(Cell::Text(customer.customer.clone()));
            cells.extend(pivot.days.iter().map(|day| quantity_cell(customer.daily.get(day))));
            cells.push(Cell::Number(customer.total_sales));
            rows.push(cells);
        }
        push_span(&mut merges, 0, start, rows.len());
    }

    PivotGrid {
        header,
        rows,
        merges,
    }
}
