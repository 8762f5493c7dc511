//! Workbook data structures

use std::collections::HashMap;
use std::path::PathBuf;

use super::parser_utils::split_destinations;

/// Represents a loaded workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
    /// Named-range definitions in workbook document order
    pub named_ranges: Vec<NamedRange>,
}

impl Workbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Non-empty cells keyed by 0-based (row, col)
    pub cells: HashMap<(u32, u32), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    /// Get a cell at the given 0-based position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get all cells with values
    pub fn all_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }
}

/// Represents a single cell
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
    Formula(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// Get the formula if this is a formula cell
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// Stringified value for header metadata, or `None` when the cell is
    /// empty or blank after trimming. Formula cells stringify to their
    /// `=`-prefixed formula text, matching what a formula-preserving reader
    /// reports as the cell value.
    pub fn header_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Formula(f) => format!("={f}"),
        };
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// A named-range definition: one name bound to zero or more
/// (sheet, cell-range) destinations.
#[derive(Debug, Clone, Default)]
pub struct NamedRange {
    pub name: String,
    /// Raw definition text as stored in the workbook,
    /// e.g. `Data!$B$5` or `'My Sheet'!$A$1:$B$2,Data!$C$1`
    pub refers_to: String,
    pub destinations: Vec<Destination>,
    /// True when the definition points outside this workbook
    pub is_external: bool,
}

/// A single (sheet, cell-range) destination of a named range
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Destination {
    pub sheet: String,
    /// Normalized A1 range with `$` and whitespace stripped, e.g. `B1:B3`
    pub cell_range: String,
}

impl NamedRange {
    /// Parse a raw definition into destinations.
    ///
    /// Destinations are the comma-separated `Sheet!Range` tokens; quoted
    /// sheet names are unquoted and `''` unescaped. Tokens without a sheet
    /// qualifier (value constants, formula-valued names) yield no
    /// destination. A qualifier embedding `[` marks the whole definition as
    /// external (`[1]Other!$A$1`, quoted external paths).
    pub fn parse(name: impl Into<String>, refers_to: impl Into<String>) -> Self {
        let name = name.into();
        let refers_to = refers_to.into();
        let mut destinations = Vec::new();
        let mut is_external = false;

        for token in split_destinations(&refers_to) {
            let Some((qualifier, range)) = split_sheet_qualifier(token) else {
                continue;
            };
            if qualifier.contains('[') {
                is_external = true;
                continue;
            }
            let cell_range: String = range
                .chars()
                .filter(|c| *c != '$' && !c.is_whitespace())
                .collect();
            if cell_range.is_empty() {
                continue;
            }
            destinations.push(Destination {
                sheet: unquote_sheet(qualifier),
                cell_range,
            });
        }

        Self {
            name,
            refers_to,
            destinations,
            is_external,
        }
    }
}

/// Split a destination token into (sheet qualifier, cell range) at the `!`
/// that terminates the qualifier. Quoted qualifiers may contain `!`.
fn split_sheet_qualifier(token: &str) -> Option<(&str, &str)> {
    let token = token.trim();
    if token.starts_with('\'') {
        let pos = token.find("'!")?;
        Some((&token[..pos + 1], &token[pos + 2..]))
    } else {
        token.split_once('!')
    }
}

/// Strip surrounding quotes and unescape doubled quotes in a sheet qualifier
fn unquote_sheet(qualifier: &str) -> String {
    qualifier.trim_matches('\'').replace("''", "'")
}
