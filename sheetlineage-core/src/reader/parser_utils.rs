//! A1-style reference parsing utilities

/// Parse a cell reference like "A1" or "$B$5" into (row, col) as 0-based
/// indices. Returns `None` for tokens that are not a plain cell reference
/// (missing digits, letters after digits, stray characters).
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col = 0u32;
    let mut row_str = String::new();

    for ch in cell_ref.chars() {
        if ch.is_ascii_alphabetic() {
            if !row_str.is_empty() {
                return None;
            }
            col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        } else if ch.is_ascii_digit() {
            row_str.push(ch);
        } else if ch != '$' {
            return None;
        }
    }

    if col == 0 || row_str.is_empty() {
        return None;
    }

    let row = row_str.parse::<u32>().ok()?;
    if row == 0 {
        return None;
    }

    // Convert to 0-based
    Some((row - 1, col - 1))
}

/// Parse a cell range like "A1:B2" into (start_row, start_col, end_row, end_col)
pub fn parse_cell_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 2 {
        return None;
    }

    let (start_row, start_col) = parse_cell_ref(parts[0])?;
    let (end_row, end_col) = parse_cell_ref(parts[1])?;

    Some((start_row, start_col, end_row, end_col))
}

/// Bounding box of a single-cell or range token as
/// (min_row, min_col, max_row, max_col), 0-based
pub fn range_bounds(cell_range: &str) -> Option<(u32, u32, u32, u32)> {
    if cell_range.contains(':') {
        let (r1, c1, r2, c2) = parse_cell_range(cell_range)?;
        Some((r1.min(r2), c1.min(c2), r1.max(r2), c1.max(c2)))
    } else {
        let (row, col) = parse_cell_ref(cell_range)?;
        Some((row, col, row, col))
    }
}

/// Split a named-range definition into destination tokens at commas that sit
/// outside single quotes
pub fn split_destinations(refers_to: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, ch) in refers_to.char_indices() {
        match ch {
            '\'' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                tokens.push(&refers_to[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&refers_to[start..]);

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
