//! Conversion from Tree-sitter points to display coordinates.
//!
//! Tree-sitter rows and columns are zero-based; diagnostics shown to people
//! are one-based.

/// Converts a zero-based Tree-sitter point into one-based `(line, column)`.
#[must_use]
pub(crate) fn one_based(point: tree_sitter::Point) -> (u32, u32) {
    let line = u32::try_from(point.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(point.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}
