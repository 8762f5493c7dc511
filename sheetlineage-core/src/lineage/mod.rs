//! Lineage builder: named ranges to metric lineage records

pub mod references;

use crate::reader::parser_utils::range_bounds;
use crate::reader::{Sheet, Workbook};
use crate::record::{MetadataContext, MetricLineage};

pub use references::extract_references;

/// Why a named-range definition or destination produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Definition points outside this workbook
    External,
    /// Definition has an empty name
    EmptyName,
    /// Destination range embeds a sheet qualifier or is not a valid A1 token
    MalformedRange(String),
    /// Destination names a sheet the workbook does not contain
    UnknownSheet(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::External => write!(f, "external reference"),
            SkipReason::EmptyName => write!(f, "empty name"),
            SkipReason::MalformedRange(range) => write!(f, "malformed range '{}'", range),
            SkipReason::UnknownSheet(sheet) => write!(f, "unknown sheet '{}'", sheet),
        }
    }
}

/// A skipped definition or destination, for optional diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of one extraction run
#[derive(Debug, Clone, Default)]
pub struct LineageReport {
    pub lineages: Vec<MetricLineage>,
    pub skipped: Vec<Skipped>,
}

/// Extract one lineage record per (named range, destination) pair, in
/// definition order then destination order.
pub fn extract_lineage(workbook: &Workbook) -> Vec<MetricLineage> {
    extract_report(workbook).lineages
}

/// Like [`extract_lineage`], but also reports which definitions and
/// destinations were skipped. Skipping never fails the run.
pub fn extract_report(workbook: &Workbook) -> LineageReport {
    let mut lineages = Vec::new();
    let mut skipped = Vec::new();

    for named in &workbook.named_ranges {
        if named.is_external {
            skipped.push(Skipped {
                name: named.name.clone(),
                reason: SkipReason::External,
            });
            continue;
        }
        if named.name.is_empty() {
            skipped.push(Skipped {
                name: String::new(),
                reason: SkipReason::EmptyName,
            });
            continue;
        }

        for destination in &named.destinations {
            // Cross-sheet-in-range forms are not supported
            if destination.cell_range.contains('!') {
                skipped.push(Skipped {
                    name: named.name.clone(),
                    reason: SkipReason::MalformedRange(destination.cell_range.clone()),
                });
                continue;
            }
            let Some((min_row, min_col, max_row, max_col)) = range_bounds(&destination.cell_range)
            else {
                skipped.push(Skipped {
                    name: named.name.clone(),
                    reason: SkipReason::MalformedRange(destination.cell_range.clone()),
                });
                continue;
            };
            let Some(sheet) = workbook.get_sheet(&destination.sheet) else {
                skipped.push(Skipped {
                    name: named.name.clone(),
                    reason: SkipReason::UnknownSheet(destination.sheet.clone()),
                });
                continue;
            };

            // Multi-cell ranges resolve to the top-left cell of the box
            let (formula, refs) = match sheet
                .get_cell(min_row, min_col)
                .and_then(|cell| cell.value.as_formula())
            {
                Some(formula) => {
                    let text = format!("={formula}");
                    let refs = extract_references(&text, &destination.sheet);
                    (Some(text), refs)
                }
                None => (None, Vec::new()),
            };

            lineages.push(MetricLineage {
                name: named.name.clone(),
                sheet: destination.sheet.clone(),
                target: destination.cell_range.clone(),
                formula,
                references: refs,
                metadata: header_context(sheet, min_row, min_col, max_row, max_col),
            });
        }
    }

    LineageReport { lineages, skipped }
}

/// Header metadata for a bounding box: non-blank cell text one row above
/// (left-to-right) and one column left (top-to-bottom). Boxes touching the
/// sheet edge get empty lists on that side.
fn header_context(
    sheet: &Sheet,
    min_row: u32,
    min_col: u32,
    max_row: u32,
    max_col: u32,
) -> MetadataContext {
    let mut top_headers = Vec::new();
    let mut left_headers = Vec::new();

    if min_row > 0 {
        for col in min_col..=max_col {
            if let Some(text) = sheet
                .get_cell(min_row - 1, col)
                .and_then(|cell| cell.value.header_text())
            {
                top_headers.push(text);
            }
        }
    }
    if min_col > 0 {
        for row in min_row..=max_row {
            if let Some(text) = sheet
                .get_cell(row, min_col - 1)
                .and_then(|cell| cell.value.header_text())
            {
                left_headers.push(text);
            }
        }
    }

    MetadataContext {
        top_headers,
        left_headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::workbook::{Cell, CellValue, NamedRange};
    use crate::record::Reference;

    fn cell(sheet: &mut Sheet, row: u32, col: u32, value: CellValue) {
        sheet.cells.insert((row, col), Cell { row, col, value });
    }

    fn data_sheet() -> Sheet {
        let mut sheet = Sheet::new("Data");
        cell(&mut sheet, 0, 1, CellValue::Number(10.0)); // B1
        cell(&mut sheet, 1, 0, CellValue::Text("Two".to_string())); // A2
        cell(&mut sheet, 1, 1, CellValue::Number(20.0)); // B2
        cell(&mut sheet, 2, 1, CellValue::Number(30.0)); // B3
        cell(&mut sheet, 3, 1, CellValue::Text("Q1".to_string())); // B4
        cell(&mut sheet, 4, 0, CellValue::Text("Total".to_string())); // A5
        cell(
            &mut sheet,
            4,
            1,
            CellValue::Formula("SUM(Data!B1:B4)".to_string()),
        ); // B5
        sheet
    }

    fn workbook(named_ranges: Vec<NamedRange>) -> Workbook {
        Workbook {
            path: "test.xlsx".into(),
            sheets: vec![data_sheet()],
            named_ranges,
        }
    }

    #[test]
    fn test_formula_target_with_headers() {
        let wb = workbook(vec![NamedRange::parse("Revenue", "Data!$B$5")]);
        let lineages = extract_lineage(&wb);

        assert_eq!(lineages.len(), 1);
        let record = &lineages[0];
        assert_eq!(record.name, "Revenue");
        assert_eq!(record.sheet, "Data");
        assert_eq!(record.target, "B5");
        assert_eq!(record.formula.as_deref(), Some("=SUM(Data!B1:B4)"));
        assert_eq!(record.references, vec![Reference::new("Data", "B1:B4")]);
        assert_eq!(record.metadata.top_headers, vec!["Q1"]);
        assert_eq!(record.metadata.left_headers, vec!["Total"]);
    }

    #[test]
    fn test_literal_target_has_no_formula() {
        let wb = workbook(vec![NamedRange::parse("Inputs", "Data!$B$1:$B$3")]);
        let lineages = extract_lineage(&wb);

        assert_eq!(lineages.len(), 1);
        let record = &lineages[0];
        assert_eq!(record.target, "B1:B3");
        assert_eq!(record.formula, None);
        assert!(record.references.is_empty());
        // Range starts at row 1: no room for top headers
        assert!(record.metadata.top_headers.is_empty());
        // Rows 1..=3, column A: only A2 holds text
        assert_eq!(record.metadata.left_headers, vec!["Two"]);
    }

    #[test]
    fn test_range_touching_both_edges_has_no_metadata() {
        let wb = workbook(vec![NamedRange::parse("Corner", "Data!$A$1")]);
        let lineages = extract_lineage(&wb);
        assert!(lineages[0].metadata.is_empty());
    }

    #[test]
    fn test_external_definition_is_skipped() {
        let wb = workbook(vec![
            NamedRange::parse("Elsewhere", "[1]Other!$A$1"),
            NamedRange::parse("Revenue", "Data!$B$5"),
        ]);
        let report = extract_report(&wb);

        assert_eq!(report.lineages.len(), 1);
        assert_eq!(report.lineages[0].name, "Revenue");
        assert_eq!(
            report.skipped,
            vec![Skipped {
                name: "Elsewhere".to_string(),
                reason: SkipReason::External,
            }]
        );
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let wb = workbook(vec![NamedRange::parse("", "Data!$B$5")]);
        let report = extract_report(&wb);
        assert!(report.lineages.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::EmptyName);
    }

    #[test]
    fn test_unknown_sheet_is_skipped_not_fatal() {
        let wb = workbook(vec![
            NamedRange::parse("Ghost", "Missing!$A$1"),
            NamedRange::parse("Revenue", "Data!$B$5"),
        ]);
        let report = extract_report(&wb);

        assert_eq!(report.lineages.len(), 1);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::UnknownSheet("Missing".to_string())
        );
    }

    #[test]
    fn test_malformed_range_is_skipped() {
        let mut named = NamedRange::parse("Weird", "Data!$B$5");
        named.destinations[0].cell_range = "B5!C6".to_string();
        let wb = workbook(vec![named]);
        let report = extract_report(&wb);

        assert!(report.lineages.is_empty());
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::MalformedRange("B5!C6".to_string())
        );
    }

    #[test]
    fn test_multiple_destinations_emit_in_order() {
        let wb = workbook(vec![NamedRange::parse(
            "Multi",
            "Data!$B$5,Data!$B$1:$B$3",
        )]);
        let lineages = extract_lineage(&wb);

        assert_eq!(lineages.len(), 2);
        assert_eq!(lineages[0].target, "B5");
        assert_eq!(lineages[1].target, "B1:B3");
    }

    #[test]
    fn test_definition_order_is_preserved() {
        let wb = workbook(vec![
            NamedRange::parse("Zebra", "Data!$B$5"),
            NamedRange::parse("Alpha", "Data!$B$2"),
        ]);
        let lineages = extract_lineage(&wb);
        let names: Vec<&str> = lineages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn test_multi_cell_range_resolves_top_left() {
        // B5:C6 box, top-left B5 holds the formula
        let wb = workbook(vec![NamedRange::parse("Box", "Data!$B$5:$C$6")]);
        let lineages = extract_lineage(&wb);
        assert_eq!(lineages[0].formula.as_deref(), Some("=SUM(Data!B1:B4)"));
        // Top headers scan B4..C4: only B4 holds text
        assert_eq!(lineages[0].metadata.top_headers, vec!["Q1"]);
        // Left headers scan A5..A6: only A5 holds text
        assert_eq!(lineages[0].metadata.left_headers, vec!["Total"]);
    }
}
