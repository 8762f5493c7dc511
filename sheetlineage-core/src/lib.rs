//! sheetlineage-core: metric lineage extraction from workbook named ranges
//!
//! For every named range in a workbook this library resolves the target
//! cells, picks up the formula stored there (if any), lexically extracts the
//! cell references the formula mentions, and gathers the header text sitting
//! directly above and to the left of the range.

pub mod lineage;
pub mod reader;
pub mod record;

use anyhow::Result;
use std::path::Path;

pub use lineage::{LineageReport, SkipReason, Skipped, extract_lineage, extract_report};
pub use record::{MetadataContext, MetricLineage, Reference};

/// Read a workbook file and extract lineage for all of its named ranges.
///
/// File-level failures (missing file, unreadable or unsupported container)
/// propagate as errors; malformed individual definitions are skipped and
/// reported in the returned [`LineageReport`].
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<LineageReport> {
    let workbook = reader::read_workbook(path)?;
    Ok(lineage::extract_report(&workbook))
}
