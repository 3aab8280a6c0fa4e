use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::sort_descending_by;
use crate::error::{ReportError, Result};
use crate::record::SaleRecord;
use crate::window::{day_span, earliest_date, latest_date};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCustomerRow {
    pub customer: String,
    pub daily: BTreeMap<NaiveDate, i64>,
    pub total_sales: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCustomerGroup {
    pub product_id: String,
    /// All customers' quantity on the last day, including filtered-out rows
    pub last_day_sales: i64,
    pub customers: Vec<StyleCustomerRow>,
}

/// Product × customer quantities over the full contiguous date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCustomerPivot {
    /// Every day from the earliest to the latest record, ascending
    pub days: Vec<NaiveDate>,
    pub groups: Vec<StyleCustomerGroup>,
}

/// Pivot each product's customers against the calendar days of the input.
///
/// A product is kept when its last-day aggregate reaches `min_last_day`; a
/// customer row within it is kept when its whole-range total reaches
/// `min_customer_total`. Products are ordered by last-day aggregate and
/// customers by total, both descending.
pub fn style_customer_pivot(
    records: &[SaleRecord],
    min_last_day: i64,
    min_customer_total: i64,
) -> Result<StyleCustomerPivot> {
    let (Some(earliest), Some(latest)) = (earliest_date(records), latest_date(records)) else {
        return Err(ReportError::EmptyInput);
    };
    let last_day = latest.date();

    let mut by_product: BTreeMap<&str, BTreeMap<&str, BTreeMap<NaiveDate, i64>>> = BTreeMap::new();
    for record in records {
        *by_product
            .entry(record.product_id.as_str())
            .or_default()
            .entry(record.customer.as_str())
            .or_default()
            .entry(record.day())
            .or_default() += record.quantity;
    }

    let mut groups = Vec::new();
    for (product_id, customers) in by_product {
        let mut last_day_sales = 0;
        let mut rows = Vec::new();

        for (customer, daily) in customers {
            last_day_sales += daily.get(&last_day).copied().unwrap_or(0);
            let total_sales: i64 = daily.values().sum();
            if total_sales >= min_customer_total {
                rows.push(StyleCustomerRow {
                    customer: customer.to_string(),
                    daily,
                    total_sales,
                });
            }
        }

        if last_day_sales < min_last_day {
            continue;
        }
        sort_descending_by(&mut rows, |row| row.total_sales);
        groups.push(StyleCustomerGroup {
            product_id: product_id.to_string(),
            last_day_sales,
            customers: rows,
        });
    }

    sort_descending_by(&mut groups, |group| group.last_day_sales);

    let days = day_span(earliest.date(), last_day);
    tracing::debug!(products = groups.len(), days = days.len(), "style+customer pivot aggregated");
    Ok(StyleCustomerPivot { days, groups })
}
