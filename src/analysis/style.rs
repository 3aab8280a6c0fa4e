use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::sort_descending_by;
use crate::error::{ReportError, Result};
use crate::record::SaleRecord;
use crate::window::latest_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePivotRow {
    pub product_id: String,
    pub daily: BTreeMap<NaiveDate, i64>,
    pub total_sales: i64,
}

impl StylePivotRow {
    pub fn quantity_on(&self, day: NaiveDate) -> Option<i64> {
        self.daily.get(&day).copied()
    }
}

/// Per-product daily quantities over every day present in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePivot {
    /// Distinct transaction days, ascending
    pub days: Vec<NaiveDate>,
    pub latest_day: NaiveDate,
    pub rows: Vec<StylePivotRow>,
}

/// Pivot products against transaction days.
///
/// Only products that sold at least `min_latest` on the latest day are kept.
/// Rows are ranked by total first, then by latest-day quantity; the second
/// ranking is authoritative and the first only settles its ties.
pub fn style_pivot(records: &[SaleRecord], min_latest: i64) -> Result<StylePivot> {
    let latest_day = latest_date(records).ok_or(ReportError::EmptyInput)?.date();

    let mut days = BTreeSet::new();
    let mut by_product: BTreeMap<&str, StylePivotRow> = BTreeMap::new();
    for record in records {
        let day = record.day();
        days.insert(day);
        let row = by_product
            .entry(record.product_id.as_str())
            .or_insert_with(|| StylePivotRow {
                product_id: record.product_id.clone(),
                daily: BTreeMap::new(),
                total_sales: 0,
            });
        *row.daily.entry(day).or_default() += record.quantity;
        row.total_sales += record.quantity;
    }

    let mut rows: Vec<StylePivotRow> = by_product
        .into_values()
        .filter(|row| row.quantity_on(latest_day).is_some_and(|q| q >= min_latest))
        .collect();

    sort_descending_by(&mut rows, |row| row.total_sales);
    rows.sort_by(|a, b| by_latest_quantity(a.quantity_on(latest_day), b.quantity_on(latest_day)));

    tracing::debug!(products = rows.len(), days = days.len(), "style pivot aggregated");
    Ok(StylePivot {
        days: days.into_iter().collect(),
        latest_day,
        rows,
    })
}

/// Descending by quantity, rows without a latest-day entry last.
fn by_latest_quantity(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(day: u32, product: &str, quantity: i64) -> SaleRecord {
        SaleRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            product_id: product.to_string(),
            customer: "Acme".to_string(),
            quantity,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn final_order_follows_latest_day_not_total() {
        let records = vec![
            sale(1, "BIG_TOTAL", 500),
            sale(4, "BIG_TOTAL", 11),
            sale(1, "BIG_TODAY", 1),
            sale(4, "BIG_TODAY", 40),
            sale(4, "TIE_LOW_TOTAL", 11),
        ];
        let pivot = style_pivot(&records, 10).unwrap();
        let ids: Vec<_> = pivot.rows.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["BIG_TODAY", "BIG_TOTAL", "TIE_LOW_TOTAL"]);
        assert_eq!(pivot.rows[1].total_sales, 511);
    }

    #[test]
    fn products_below_latest_threshold_are_excluded() {
        let records = vec![
            sale(1, "OLD_HIT", 300),
            sale(2, "OLD_HIT", 9),
            sale(2, "FRESH", 10),
            sale(1, "NOT_TODAY", 50),
        ];
        let pivot = style_pivot(&records, 10).unwrap();
        let ids: Vec<_> = pivot.rows.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["FRESH"]);
        assert!(pivot
            .rows
            .iter()
            .all(|r| r.quantity_on(pivot.latest_day).unwrap_or(0) >= 10));
    }

    #[test]
    fn days_are_distinct_observed_days_ascending() {
        let records = vec![sale(5, "A", 10), sale(1, "B", 1), sale(3, "A", 2), sale(5, "B", 1)];
        let pivot = style_pivot(&records, 10).unwrap();
        assert_eq!(pivot.days, vec![day(1), day(3), day(5)]);
        assert_eq!(pivot.latest_day, day(5));
        assert_eq!(pivot.rows[0].daily.get(&day(1)), None);
        assert_eq!(pivot.rows[0].quantity_on(day(3)), Some(2));
    }

    #[test]
    fn missing_latest_entries_sort_last() {
        assert_eq!(by_latest_quantity(Some(1), None), Ordering::Less);
        assert_eq!(by_latest_quantity(None, Some(1)), Ordering::Greater);
        assert_eq!(by_latest_quantity(Some(3), Some(7)), Ordering::Greater);
    }
}
