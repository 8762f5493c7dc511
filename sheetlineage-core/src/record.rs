//! Output record types for lineage extraction

use serde::{Deserialize, Serialize};

/// A single cell or cell-range token found inside a formula, with its sheet
/// resolved (the formula's own sheet when the token carried no qualifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub sheet: String,
    /// The cell or range token, e.g. `B3` or `B1:B4`.
    #[serde(rename = "ref")]
    pub cell: String,
}

impl Reference {
    pub fn new(sheet: impl Into<String>, cell: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cell: cell.into(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.sheet, self.cell)
    }
}

/// Non-blank cell text found directly above (same columns, one row up) and
/// directly left (same rows, one column left) of a named range's bounding
/// box. Both lists are empty when the range touches the sheet edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataContext {
    pub top_headers: Vec<String>,
    pub left_headers: Vec<String>,
}

impl MetadataContext {
    pub fn is_empty(&self) -> bool {
        self.top_headers.is_empty() && self.left_headers.is_empty()
    }
}

/// One named range destination, fully resolved.
///
/// `references` is non-empty only when `formula` is present. Records are
/// created once per extraction run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricLineage {
    pub name: String,
    pub sheet: String,
    /// A1-style target, single cell (`B5`) or range (`B1:B3`).
    pub target: String,
    /// Formula text with a leading `=`, or `None` for literal targets.
    pub formula: Option<String>,
    pub references: Vec<Reference>,
    pub metadata: MetadataContext,
}
