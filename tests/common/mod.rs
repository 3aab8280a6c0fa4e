#![allow(dead_code)]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;

/// (timestamp, customer, product, quantity)
pub type Sale<'a> = (&'a str, &'a str, &'a str, i64);

const HEADER: [&str; 12] = [
    "Date", "Order", "Customer", "Product", "Color", "Size", "Warehouse", "Price", "Quantity",
    "Amount", "Clerk", "Note",
];

/// Write a first sheet laid out like a sales export: twelve columns with the
/// timestamp in A, customer in C, product in D and quantity in I.
pub fn write_sales(path: &Path, sales: &[Sale]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (idx, (date, customer, product, quantity)) in sales.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *date).unwrap();
        sheet.write_string(row, 1, format!("SO-{row}")).unwrap();
        sheet.write_string(row, 2, *customer).unwrap();
        sheet.write_string(row, 3, *product).unwrap();
        for col in [4u16, 5, 6, 7, 9, 10, 11] {
            sheet.write_string(row, col, "-").unwrap();
        }
        sheet.write_number(row, 8, *quantity as f64).unwrap();
    }
    workbook.save(path).unwrap();
}

/// Eight days of A100 for Acme ending in a 20-unit day, plus two small
/// B200 customers on the last day.
pub fn scenario_sales() -> Vec<Sale<'static>> {
    vec![
        ("3/1/25 9:00", "Acme", "A100", 5),
        ("3/2/25 9:00", "Acme", "A100", 5),
        ("3/3/25 9:00", "Acme", "A100", 5),
        ("3/4/25 9:00", "Acme", "A100", 5),
        ("3/5/25 9:00", "Acme", "A100", 5),
        ("3/6/25 9:00", "Acme", "A100", 5),
        ("3/7/25 9:00", "Acme", "A100", 5),
        ("3/8/25 9:00", "Acme", "A100", 20),
        ("3/8/25 11:30", "Beta", "B200", 7),
        ("3/8/25 16:45", "Gamma", "B200", 6),
    ]
}

pub fn read_sheet(path: &Path, name: &str) -> Range<Data> {
    let mut workbook = open_workbook_auto(path).unwrap();
    workbook.worksheet_range(name).unwrap()
}

pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook = open_workbook_auto(path).unwrap();
    workbook.sheet_names().to_vec()
}

pub fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => f.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub fn number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}
