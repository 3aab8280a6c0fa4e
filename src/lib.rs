pub mod analysis;
pub mod config;
pub mod error;
pub mod grid;
pub mod record;
pub mod report;
pub mod window;
pub mod xlsx;

pub use config::Config;
pub use error::{ReportError, Result};
pub use grid::{Cell, MergeSpan, PivotGrid};
pub use record::{ingest, IngestProfile, SaleRecord};
pub use report::{
    assemble, build_view, generate_report, LogProgress, ProgressSink, Report, ReportOutcome, View,
};
