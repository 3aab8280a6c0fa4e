mod settings;

pub use settings::{
    column_index, ColumnLayout, ColumnMap, Config, InputSettings, Labels, OutputSettings,
    Thresholds,
};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.sales-report/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "sales-report") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".sales-report"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Load config.toml, falling back to built-in defaults when it does not exist
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_file(config_dir);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[input]
date_format = "%m/%d/%y %H:%M"   # timestamp column, e.g. 3/8/25 14:05
min_columns = 12                 # shorter rows are skipped
style_min_columns = 9            # minimum used by the per-style pivot

[input.columns]
date = "A"
customer = "C"
product = "D"
quantity = "I"

[thresholds]
customer_day_min = 10             # product total on the latest day
style_latest_min = 10             # product quantity on the latest day
style_customer_last_day_min = 10  # product total on the latest day
style_customer_total_min = 20     # customer total over the whole range
min_days = 7                      # coverage needed by the daily/weekly view

[labels]
daily_sheet = "Sales"
customer_sheet = "Customers"
style_customer_sheet = "Style+Customer"
style_sheet = "Style"
# product = "Product"
# total = "Total"
# day_header_format = "%m/%d"

[output]
suffix = "_analyzed"   # report.xlsx -> report_analyzed.xlsx
"#;
