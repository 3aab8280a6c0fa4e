use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Message prefix the shell keys on to present coverage problems as actionable.
pub const INSUFFICIENT_DATA_PREFIX: &str = "Insufficient data";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'sales-report init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid column reference '{0}'. Expected spreadsheet letters (e.g., 'A', 'AB')")]
    InvalidColumn(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Failed to open workbook {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("No sheets found in workbook {0}")]
    NoSheets(PathBuf),

    #[error("Error parsing {field} '{value}' in row {row}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("No usable sales records found in the input")]
    EmptyInput,

    #[error("Insufficient data: at least {required} days are needed, input covers {earliest} to {latest} ({days} days)")]
    InsufficientData {
        earliest: NaiveDate,
        latest: NaiveDate,
        days: i64,
        required: i64,
    },

    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True for the coverage failure the user can fix by supplying more days.
    pub fn is_insufficient_data(&self) -> bool {
        self.to_string().starts_with(INSUFFICIENT_DATA_PREFIX)
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
