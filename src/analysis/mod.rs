//! The four aggregation strategies behind the report sheets.
//!
//! Each strategy is a pure function over the full record set that groups,
//! applies its inclusion thresholds, and returns results in final sheet
//! order. Groupings use ordered maps, so equal sort keys fall back to
//! ascending product or customer id rather than hash order.

mod customer;
mod daily;
mod style;
mod style_customer;

pub use customer::{customer_breakdown, CustomerBreakdown, CustomerQuantity};
pub use daily::{daily_weekly, DailyWeeklyStat};
pub use style::{style_pivot, StylePivot, StylePivotRow};
pub use style_customer::{
    style_customer_pivot, StyleCustomerGroup, StyleCustomerPivot, StyleCustomerRow,
};

use std::cmp::Reverse;

/// Stable descending sort; ties keep their current relative order.
pub(crate) fn sort_descending_by<T, K: Ord>(items: &mut [T], mut key: impl FnMut(&T) -> K) {
    items.sort_by_key(|item| Reverse(key(item)));
}
