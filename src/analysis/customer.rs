use std::collections::BTreeMap;

use serde::Serialize;

use super::sort_descending_by;
use crate::error::{ReportError, Result};
use crate::record::SaleRecord;
use crate::window::latest_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerQuantity {
    pub customer: String,
    pub quantity: i64,
}

/// Latest-day sales of one product split by customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerBreakdown {
    pub product_id: String,
    pub total: i64,
    pub customers: Vec<CustomerQuantity>,
}

/// Split the latest day's sales by product and customer.
///
/// Products whose same-day total is below `min_total` are dropped. Customers
/// are ordered by quantity and products by total, both descending.
pub fn customer_breakdown(records: &[SaleRecord], min_total: i64) -> Result<Vec<CustomerBreakdown>> {
    let latest = latest_date(records).ok_or(ReportError::EmptyInput)?.date();

    let mut by_product: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.day() == latest) {
        *by_product
            .entry(record.product_id.as_str())
            .or_default()
            .entry(record.customer.as_str())
            .or_default() += record.quantity;
    }

    let mut breakdowns: Vec<CustomerBreakdown> = by_product
        .into_iter()
        .filter_map(|(product_id, customers)| {
            let total: i64 = customers.values().sum();
            if total < min_total {
                return None;
            }
            let mut customers: Vec<CustomerQuantity> = customers
                .into_iter()
                .map(|(customer, quantity)| CustomerQuantity {
                    customer: customer.to_string(),
                    quantity,
                })
                .collect();
            sort_descending_by(&mut customers, |c| c.quantity);
            Some(CustomerBreakdown {
                product_id: product_id.to_string(),
                total,
                customers,
            })
        })
        .collect();

    sort_descending_by(&mut breakdowns, |b| b.total);

    tracing::debug!(products = breakdowns.len(), day = %latest, "customer breakdown aggregated");
    Ok(breakdowns)
}
