//! Output formatters for lineage records

use anyhow::Result;
use colored::*;
use sheetlineage_core::{MetricLineage, Skipped};

/// Render records as a pretty-printed JSON array. Non-ASCII text passes
/// through unescaped; absent formulas serialize as `null`.
pub fn render_json(lineages: &[MetricLineage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(lineages)?)
}

/// Render records as a Markdown report, one section per record in extraction
/// order. The document ends with exactly one trailing newline.
pub fn render_markdown(lineages: &[MetricLineage]) -> String {
    let mut lines: Vec<String> = vec!["# Metric Lineage".to_string(), String::new()];

    for item in lineages {
        lines.push(format!("## {}", item.name));
        lines.push(format!("- Sheet: `{}`", item.sheet));
        lines.push(format!("- Target: `{}`", item.target));
        if let Some(formula) = &item.formula {
            lines.push(format!("- Formula: `{}`", formula));
        }
        if !item.references.is_empty() {
            lines.push("- References:".to_string());
            for reference in &item.references {
                lines.push(format!("  - `{}`", reference));
            }
        }
        if !item.metadata.is_empty() {
            lines.push("- Metadata:".to_string());
            if !item.metadata.top_headers.is_empty() {
                lines.push(format!(
                    "  - Top headers: {}",
                    item.metadata.top_headers.join(", ")
                ));
            }
            if !item.metadata.left_headers.is_empty() {
                lines.push(format!(
                    "  - Left headers: {}",
                    item.metadata.left_headers.join(", ")
                ));
            }
        }
        lines.push(String::new());
    }

    format!("{}\n", lines.join("\n").trim_end())
}

/// Print skipped named-range diagnostics to stderr
pub fn print_skipped(skipped: &[Skipped]) {
    for skip in skipped {
        let name = if skip.name.is_empty() {
            "<unnamed>"
        } else {
            skip.name.as_str()
        };
        eprintln!(
            "{} {} ({})",
            "skipped:".yellow().bold(),
            name,
            skip.reason
        );
    }
}
