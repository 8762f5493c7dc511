//! End-to-end extraction over a minimal checked-in workbook
//!
//! The fixture has one sheet `Data` with values in B1:B3, header text `Q1`
//! at B4 and `Total` at A5, and `=SUM(Data!B1:B4)` at B5. Defined names:
//! `Revenue -> Data!$B$5`, `Inputs -> Data!$B$1:$B$3`, and an external
//! `Elsewhere -> [1]Other!$A$1`.

use sheetlineage_core::{SkipReason, extract_file, reader};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/minimal_lineage.xlsx")
}

#[test]
fn test_reader_materializes_sheet_and_names() {
    let workbook = reader::read_workbook(fixture_path()).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Data"]);
    let names: Vec<&str> = workbook
        .named_ranges
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["Revenue", "Inputs", "Elsewhere"]);

    let sheet = workbook.get_sheet("Data").unwrap();
    // B5 holds the formula text, not its cached value
    assert_eq!(
        sheet.get_cell(4, 1).unwrap().value.as_formula(),
        Some("SUM(Data!B1:B4)")
    );
    assert!(!sheet.get_cell(0, 1).unwrap().value.is_formula());
}

#[test]
fn test_end_to_end_lineage() {
    let report = extract_file(fixture_path()).unwrap();

    assert_eq!(report.lineages.len(), 2);

    let revenue = &report.lineages[0];
    assert_eq!(revenue.name, "Revenue");
    assert_eq!(revenue.sheet, "Data");
    assert_eq!(revenue.target, "B5");
    assert_eq!(revenue.formula.as_deref(), Some("=SUM(Data!B1:B4)"));
    assert_eq!(revenue.references.len(), 1);
    assert_eq!(revenue.references[0].sheet, "Data");
    assert_eq!(revenue.references[0].cell, "B1:B4");
    assert_eq!(revenue.metadata.top_headers, vec!["Q1"]);
    assert_eq!(revenue.metadata.left_headers, vec!["Total"]);

    let inputs = &report.lineages[1];
    assert_eq!(inputs.name, "Inputs");
    assert_eq!(inputs.target, "B1:B3");
    assert_eq!(inputs.formula, None);
    assert!(inputs.references.is_empty());
    assert!(inputs.metadata.top_headers.is_empty());
    assert_eq!(inputs.metadata.left_headers, vec!["Two"]);

    // The external definition produces no record, only a diagnostic
    assert!(report.lineages.iter().all(|l| l.name != "Elsewhere"));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "Elsewhere");
    assert_eq!(report.skipped[0].reason, SkipReason::External);
}

#[test]
fn test_missing_file_is_fatal() {
    let missing = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/no_such_file.xlsx");
    assert!(extract_file(missing).is_err());
}
