//! Workbook reader backed by calamine
//!
//! calamine supplies per-sheet cell values and formula text; named-range
//! definitions are read from `xl/workbook.xml` directly since calamine does
//! not expose them through `Sheets`.

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

pub mod parser_utils;
pub mod workbook;
pub mod xml_parser;

pub use workbook::{Cell, CellValue, Destination, NamedRange, Sheet, Workbook};

/// Errors raised while reading workbook metadata
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("workbook XML is malformed: {0}")]
    MalformedWorkbookXml(#[from] quick_xml::Error),
}

/// Read a workbook from a file path
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut excel: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::new();

    for sheet_name in &sheet_names {
        let values = excel.worksheet_range(sheet_name).ok();
        let formulas = excel.worksheet_formula(sheet_name).ok();
        sheets.push(parse_sheet(sheet_name, values.as_ref(), formulas.as_ref()));
    }

    // Named ranges live in xl/workbook.xml; only zip containers carry it
    let is_zip_container = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("xlsx") || s.eq_ignore_ascii_case("xlsm"))
        .unwrap_or(false);

    let named_ranges = if is_zip_container {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).context("Failed to open zip archive")?;
        xml_parser::extract_defined_names(&mut archive)?
            .into_iter()
            .map(|(name, refers_to)| NamedRange::parse(name, refers_to))
            .collect()
    } else {
        Vec::new()
    };

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
        named_ranges,
    })
}

fn parse_sheet(
    name: &str,
    values: Option<&Range<Data>>,
    formulas: Option<&Range<String>>,
) -> Sheet {
    let mut sheet = Sheet::new(name);

    if let Some(values) = values {
        if let Some((start_row, start_col)) = values.start() {
            let (rows, cols) = values.get_size();
            for rel_row in 0..rows {
                for rel_col in 0..cols {
                    let Some(data) = values.get((rel_row, rel_col)) else {
                        continue;
                    };
                    if matches!(data, Data::Empty) {
                        continue;
                    }
                    let row = start_row + rel_row as u32;
                    let col = start_col + rel_col as u32;
                    sheet.cells.insert(
                        (row, col),
                        Cell {
                            row,
                            col,
                            value: parse_cell_value(data),
                        },
                    );
                }
            }
        }
    }

    // Formula text wins over the cached value at the same position
    if let Some(formulas) = formulas {
        if let Some((start_row, start_col)) = formulas.start() {
            let (rows, cols) = formulas.get_size();
            for rel_row in 0..rows {
                for rel_col in 0..cols {
                    let Some(formula) = formulas.get((rel_row, rel_col)) else {
                        continue;
                    };
                    if formula.is_empty() {
                        continue;
                    }
                    let row = start_row + rel_row as u32;
                    let col = start_col + rel_col as u32;
                    sheet.cells.insert(
                        (row, col),
                        Cell {
                            row,
                            col,
                            value: CellValue::Formula(formula.clone()),
                        },
                    );
                }
            }
        }
    }

    sheet
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
