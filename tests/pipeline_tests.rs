mod common;

use chrono::NaiveDate;
use sales_report::{generate_report, Config, ReportError};
use tempfile::TempDir;

use common::{number, read_sheet, scenario_sales, sheet_names, text, write_sales};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
}

fn quiet(_: u8, _: &str) {}

#[test]
fn test_report_has_four_sheets_in_order() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.xlsx");
    write_sales(&input, &scenario_sales());

    let outcome = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap();

    assert_eq!(outcome.output, dir.path().join("sales_analyzed.xlsx"));
    assert!(outcome.output.exists());
    assert_eq!(
        sheet_names(&outcome.output),
        vec!["03.09 Sales", "03.09 Customers", "03 Style+Customer", "03 Style"]
    );
    let shapes: Vec<_> = outcome.sheets.iter().map(|s| (s.rows, s.columns)).collect();
    assert_eq!(shapes, vec![(2, 4), (3, 3), (1, 11), (2, 10)]);
}

#[test]
fn test_daily_sheet_values() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.xlsx");
    write_sales(&input, &scenario_sales());
    let outcome = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap();

    let sheet = read_sheet(&outcome.output, "03.09 Sales");
    assert_eq!(text(&sheet, 0, 0), "Product");
    assert_eq!(text(&sheet, 1, 0), "A100");
    assert_eq!(number(&sheet, 1, 1), Some(20.0));
    assert_eq!(number(&sheet, 1, 2), Some(50.0));
    assert_eq!(number(&sheet, 1, 3), Some(15.0));
    assert_eq!(text(&sheet, 2, 0), "B200");
    assert_eq!(number(&sheet, 2, 1), Some(13.0));
}

#[test]
fn test_customer_sheet_lists_latest_day_customers() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.xlsx");
    write_sales(&input, &scenario_sales());
    let outcome = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap();

    let sheet = read_sheet(&outcome.output, "03.09 Customers");
    assert_eq!(text(&sheet, 1, 0), "A100");
    assert_eq!(text(&sheet, 1, 1), "Acme");
    assert_eq!(number(&sheet, 1, 2), Some(20.0));
    assert_eq!(text(&sheet, 2, 0), "B200");
    assert_eq!(text(&sheet, 2, 1), "Beta");
    assert_eq!(text(&sheet, 3, 1), "Gamma");
    assert_eq!(number(&sheet, 3, 2), Some(6.0));
}

#[test]
fn test_style_sheets_leave_missing_days_blank() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.xlsx");
    write_sales(&input, &scenario_sales());
    let outcome = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap();

    let style = read_sheet(&outcome.output, "03 Style");
    assert_eq!(text(&style, 0, 1), "03/01");
    assert_eq!(text(&style, 0, 9), "Total");
    assert_eq!(text(&style, 2, 0), "B200");
    assert_eq!(number(&style, 2, 1), None);
    assert_eq!(number(&style, 2, 8), Some(13.0));
    assert_eq!(number(&style, 1, 9), Some(55.0));

    let style_customer = read_sheet(&outcome.output, "03 Style+Customer");
    assert_eq!(text(&style_customer, 1, 0), "A100");
    assert_eq!(text(&style_customer, 1, 1), "Acme");
    assert_eq!(number(&style_customer, 1, 10), Some(55.0));
    assert_eq!(text(&style_customer, 2, 0), "");
}

#[test]
fn test_insufficient_data_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("short.xlsx");
    let sales: Vec<_> = scenario_sales().into_iter().skip(3).collect();
    write_sales(&input, &sales);

    let err = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap_err();
    match &err {
        ReportError::InsufficientData { days, .. } => assert_eq!(*days, 5),
        other => panic!("expected insufficient data, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Insufficient data"));
    assert!(!dir.path().join("short_analyzed.xlsx").exists());
}

#[test]
fn test_header_only_input_is_empty() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.xlsx");
    write_sales(&input, &[]);

    let err = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap_err();
    assert!(matches!(err, ReportError::EmptyInput));
    assert!(!dir.path().join("empty_analyzed.xlsx").exists());
}

#[test]
fn test_malformed_date_names_the_row() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.xlsx");
    let mut sales = scenario_sales();
    sales[1].0 = "March 2nd";
    write_sales(&input, &sales);

    let err = generate_report(&input, None, &Config::default(), run_date(), &quiet).unwrap_err();
    assert!(matches!(err, ReportError::Parse { row: 3, field: "date", .. }));
}

#[test]
fn test_configured_thresholds_change_the_views() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.xlsx");
    write_sales(&input, &scenario_sales());

    let mut config = Config::default();
    config.thresholds.customer_day_min = 15;
    config.labels.daily_sheet = "Daily".to_string();
    let output = dir.path().join("out").join("custom.xlsx");

    let outcome =
        generate_report(&input, Some(output.as_path()), &config, run_date(), &quiet).unwrap();
    assert_eq!(outcome.output, output);
    assert_eq!(outcome.sheets[0].name, "03.09 Daily");
    assert_eq!(outcome.sheets[1].rows, 1);
}
