//! Types describing a single line-range edit.
//!
//! Lines are numbered from one and ranges are inclusive at both ends, matching
//! what a numbered listing from [`crate::view`] shows.

use std::fmt;
use std::path::{Path, PathBuf};

/// An inclusive, one-based range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Creates a range from `start` to `end`, both inclusive.
    ///
    /// No validation happens here; [`LineRange::fits`] compares the range
    /// against a concrete line count.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a range covering exactly one line.
    #[must_use]
    pub const fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    /// First line of the range.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Last line of the range.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns true when `1 <= start <= end <= line_count`.
    #[must_use]
    pub const fn fits(self, line_count: usize) -> bool {
        self.start >= 1 && self.start <= self.end && self.end <= line_count
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Text that replaces a line range.
///
/// The block is one unit: embedded line breaks are kept as they are and the
/// block is never re-split into per-line entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementText(String);

impl ReplacementText {
    /// Wraps `text` as a replacement block.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// An empty block, which leaves a single empty line in place of the range.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// The block as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ReplacementText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ReplacementText {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for ReplacementText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One requested mutation: replace `range` in `target_path` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    target_path: PathBuf,
    range: LineRange,
    replacement: ReplacementText,
}

impl EditRequest {
    /// Builds a request.
    #[must_use]
    pub fn new(
        target_path: impl Into<PathBuf>,
        range: LineRange,
        replacement: impl Into<ReplacementText>,
    ) -> Self {
        Self {
            target_path: target_path.into(),
            range,
            replacement: replacement.into(),
        }
    }

    /// Builds a request from raw line numbers.
    #[must_use]
    pub fn replace_lines(
        target_path: impl Into<PathBuf>,
        start_line: usize,
        end_line: usize,
        replacement: impl Into<ReplacementText>,
    ) -> Self {
        Self::new(target_path, LineRange::new(start_line, end_line), replacement)
    }

    /// File to mutate.
    #[must_use]
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Lines to replace.
    #[must_use]
    pub const fn range(&self) -> LineRange {
        self.range
    }

    /// Replacement block.
    #[must_use]
    pub const fn replacement(&self) -> &ReplacementText {
        &self.replacement
    }
}
