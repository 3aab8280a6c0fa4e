use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{ColumnLayout, InputSettings};
use crate::error::{ReportError, Result};

/// One dated sales transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    pub date: NaiveDateTime,
    pub product_id: String,
    pub customer: String,
    pub quantity: i64,
}

impl SaleRecord {
    /// Calendar day of the transaction, time truncated.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// How raw rows are turned into records for a given view.
#[derive(Debug, Clone)]
pub struct IngestProfile {
    pub min_columns: usize,
    pub layout: ColumnLayout,
    pub date_format: String,
}

impl IngestProfile {
    /// Profile shared by the daily, customer and style+customer views.
    pub fn standard(input: &InputSettings) -> Result<Self> {
        Ok(Self {
            min_columns: input.min_columns,
            layout: input.columns.resolve()?,
            date_format: input.date_format.clone(),
        })
    }

    /// Profile of the per-style pivot, which accepts narrower rows.
    pub fn style(input: &InputSettings) -> Result<Self> {
        Ok(Self {
            min_columns: input.style_min_columns,
            ..Self::standard(input)?
        })
    }
}

/// Parse raw text rows into sale records.
///
/// The first row is a header. Rows narrower than the profile minimum are
/// skipped; a malformed date or quantity in a kept row aborts with the
/// 1-based sheet row number.
pub fn ingest<R: AsRef<[String]>>(rows: &[R], profile: &IngestProfile) -> Result<Vec<SaleRecord>> {
    let mut records = Vec::with_capacity(rows.len().saturating_sub(1));
    let mut skipped = 0usize;

    for (i, row) in rows.iter().enumerate().skip(1) {
        let row = row.as_ref();
        if row.len() < profile.min_columns {
            skipped += 1;
            continue;
        }
        let row_number = i + 1;
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

        let date_text = cell(profile.layout.date);
        let date = parse_timestamp(date_text, &profile.date_format).ok_or_else(|| {
            ReportError::Parse {
                row: row_number,
                field: "date",
                value: date_text.to_string(),
            }
        })?;

        let quantity_text = cell(profile.layout.quantity);
        let quantity = quantity_text
            .parse::<i64>()
            .map_err(|_| ReportError::Parse {
                row: row_number,
                field: "quantity",
                value: quantity_text.to_string(),
            })?;

        records.push(SaleRecord {
            date,
            product_id: cell(profile.layout.product).to_string(),
            customer: cell(profile.layout.customer).to_string(),
            quantity,
        });
    }

    if skipped > 0 {
        tracing::debug!(
            skipped,
            min_columns = profile.min_columns,
            "skipped rows with insufficient columns"
        );
    }

    Ok(records)
}

/// Parse a timestamp; date-only formats land on midnight.
fn parse_timestamp(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
