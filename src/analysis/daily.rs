use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::sort_descending_by;
use crate::error::{ReportError, Result};
use crate::record::SaleRecord;
use crate::window::{earliest_date, latest_date, trailing_days, validate_range};

/// Per-product sales anchored on the latest day `D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyWeeklyStat {
    pub product_id: String,
    /// Quantity sold on `D`
    pub daily_sales: i64,
    /// Quantity sold over `D-6..=D`
    pub weekly_sales: i64,
    /// `weekly_sales` minus the quantity over `D-7..=D-1`
    pub weekly_compare: i64,
}

impl DailyWeeklyStat {
    fn is_noise(&self) -> bool {
        self.daily_sales == 0 && self.weekly_sales == 0 && self.weekly_compare == 0
    }
}

/// Daily and trailing-week sales per product, highest daily sales first.
///
/// The current and comparison weeks are both seven days long and share six
/// of them, so `weekly_compare` reduces to `sales(D) - sales(D-7)`.
pub fn daily_weekly(records: &[SaleRecord], min_days: i64) -> Result<Vec<DailyWeeklyStat>> {
    let (Some(earliest), Some(latest)) = (earliest_date(records), latest_date(records)) else {
        return Err(ReportError::EmptyInput);
    };
    validate_range(earliest, latest, min_days)?;

    let mut by_product: BTreeMap<&str, HashMap<NaiveDate, i64>> = BTreeMap::new();
    for record in records {
        *by_product
            .entry(record.product_id.as_str())
            .or_default()
            .entry(record.day())
            .or_default() += record.quantity;
    }

    let window = trailing_days(latest.date(), 8);
    let current_week = &window[..window.len().min(7)];
    let previous_week = &window[1.min(window.len())..];

    let mut stats: Vec<DailyWeeklyStat> = by_product
        .into_iter()
        .map(|(product_id, sales)| {
            let sum = |days: &[NaiveDate]| -> i64 {
                days.iter().filter_map(|day| sales.get(day)).sum()
            };
            let weekly_sales = sum(current_week);
            DailyWeeklyStat {
                product_id: product_id.to_string(),
                daily_sales: sales.get(&latest.date()).copied().unwrap_or(0),
                weekly_sales,
                weekly_compare: weekly_sales - sum(previous_week),
            }
        })
        .filter(|stat| !stat.is_noise())
        .collect();

    sort_descending_by(&mut stats, |stat| stat.daily_sales);

    tracing::debug!(products = stats.len(), anchor = %latest.date(), "daily/weekly aggregated");
    Ok(stats)
}
