//! Lexical extraction of cell references from formula text

use regex::Regex;
use std::sync::OnceLock;

use crate::record::Reference;

/// Best-effort lexical scan, not a formula parser. It recognizes an optional
/// sheet qualifier (quoted, or a bare identifier-like name) followed by `!`,
/// then a cell or cell-range token with optional `$` anchors and whitespace
/// around `:`. Function names, string literals containing `!`, and
/// structured/array references are not understood and may over- or
/// under-match; that is an accepted limitation of this scanner.
fn cell_ref_pattern() -> &'static Regex {
    static CELL_REF: OnceLock<Regex> = OnceLock::new();
    CELL_REF.get_or_init(|| {
        Regex::new(
            r"(?:('[^']+'|[A-Za-z_][A-Za-z0-9_.]*)!)?(\$?[A-Za-z]{1,3}\$?[0-9]+(?:\s*:\s*\$?[A-Za-z]{1,3}\$?[0-9]+)?)",
        )
        .unwrap()
    })
}

/// Extract cell/range references from `formula` in order of appearance.
///
/// `sheet` is the sheet owning the formula; unqualified tokens resolve to it.
/// Quoted qualifiers lose their surrounding quotes, and whitespace inside a
/// range token is stripped (`A1 : B2` becomes `A1:B2`).
pub fn extract_references(formula: &str, sheet: &str) -> Vec<Reference> {
    let mut references = Vec::new();
    for captures in cell_ref_pattern().captures_iter(formula) {
        let ref_sheet = match captures.get(1) {
            Some(qualifier) => qualifier.as_str().trim_matches('\'').to_string(),
            None => sheet.to_string(),
        };
        let cell: String = captures[2].chars().filter(|c| !c.is_whitespace()).collect();
        references.push(Reference::new(ref_sheet, cell));
    }
    references
}
