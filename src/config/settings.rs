use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputSettings,
    pub thresholds: Thresholds,
    pub labels: Labels,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct InputSettings {
    /// chrono format of the transaction timestamp column
    pub date_format: String,
    /// Rows narrower than this are skipped by the product/customer/date views
    pub min_columns: usize,
    /// Narrower minimum used by the per-style pivot
    pub style_min_columns: usize,
    pub columns: ColumnMap,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            date_format: "%m/%d/%y %H:%M".to_string(),
            min_columns: 12,
            style_min_columns: 9,
            columns: ColumnMap::default(),
        }
    }
}

/// Spreadsheet column letters of the fields the analyses read.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub customer: String,
    pub product: String,
    pub quantity: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: "A".to_string(),
            customer: "C".to_string(),
            product: "D".to_string(),
            quantity: "I".to_string(),
        }
    }
}

/// Zero-based positions resolved from a [`ColumnMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub customer: usize,
    pub product: usize,
    pub quantity: usize,
}

impl ColumnMap {
    pub fn resolve(&self) -> Result<ColumnLayout> {
        Ok(ColumnLayout {
            date: column_index(&self.date)?,
            customer: column_index(&self.customer)?,
            product: column_index(&self.product)?,
            quantity: column_index(&self.quantity)?,
        })
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            date: 0,
            customer: 2,
            product: 3,
            quantity: 8,
        }
    }
}

/// Convert a column letter reference to a zero-based index ("A" = 0, "AA" = 26).
pub fn column_index(letters: &str) -> Result<usize> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(ReportError::InvalidColumn(letters.to_string()));
    }

    let mut index = 0usize;
    for ch in trimmed.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(ReportError::InvalidColumn(letters.to_string()));
        }
        index = index * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Ok(index - 1)
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum latest-day total for a product in the customer breakdown
    pub customer_day_min: i64,
    /// Minimum latest-day quantity for a product in the style pivot
    pub style_latest_min: i64,
    /// Minimum last-day aggregate for a product in the style+customer pivot
    pub style_customer_last_day_min: i64,
    /// Minimum whole-range total for a customer row in the style+customer pivot
    pub style_customer_total_min: i64,
    /// Minimum days of coverage for the daily/weekly view
    pub min_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            customer_day_min: 10,
            style_latest_min: 10,
            style_customer_last_day_min: 10,
            style_customer_total_min: 20,
            min_days: 7,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Labels {
    pub daily_sheet: String,
    pub customer_sheet: String,
    pub style_customer_sheet: String,
    pub style_sheet: String,
    pub product: String,
    pub customer: String,
    pub quantity: String,
    pub daily_sales: String,
    pub weekly_sales: String,
    pub weekly_compare: String,
    pub total: String,
    /// chrono format of the per-day pivot column headers
    pub day_header_format: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            daily_sheet: "Sales".to_string(),
            customer_sheet: "Customers".to_string(),
            style_customer_sheet: "Style+Customer".to_string(),
            style_sheet: "Style".to_string(),
            product: "Product".to_string(),
            customer: "Customer".to_string(),
            quantity: "Quantity".to_string(),
            daily_sales: "Daily Sales".to_string(),
            weekly_sales: "7-Day Sales".to_string(),
            weekly_compare: "7-Day Change".to_string(),
            total: "Total".to_string(),
            day_header_format: "%m/%d".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputSettings {
    /// Appended to the input file stem to name the generated workbook
    pub suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            suffix: "_analyzed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_resolve_to_zero_based_indexes() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("i").unwrap(), 8);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AB").unwrap(), 27);
    }

    #[test]
    fn invalid_column_letters_are_rejected() {
        assert!(matches!(column_index(""), Err(ReportError::InvalidColumn(_))));
        assert!(matches!(column_index("A1"), Err(ReportError::InvalidColumn(_))));
        assert!(matches!(column_index("ABCD"), Err(ReportError::InvalidColumn(_))));
    }

    #[test]
    fn default_columns_match_default_layout() {
        let layout = ColumnMap::default().resolve().unwrap();
        assert_eq!(layout, ColumnLayout::default());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[thresholds]\nmin_days = 3\n").unwrap();
        assert_eq!(config.thresholds.min_days, 3);
        assert_eq!(config.thresholds.style_customer_total_min, 20);
        assert_eq!(config.input.min_columns, 12);
        assert_eq!(config.labels.total, "Total");
    }
}
