//! In-memory line splicing.
//!
//! A line is the text up to and including its `\n`. The final line may lack a
//! terminator. An empty string has no lines.

use crate::edit::{LineRange, ReplacementText};

/// Range that did not fit the text it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutOfRange {
    pub(crate) line_count: usize,
}

/// Splits `text` into lines, each keeping its terminator.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Replaces the lines in `range` with `replacement`.
///
/// The replacement is inserted as one block. When the last replaced line had
/// a terminator and the block does not end with `\n`, that terminator (`\n` or
/// `\r\n`) is appended so the following line stays separate.
pub(crate) fn splice(
    text: &str,
    range: LineRange,
    replacement: &ReplacementText,
) -> Result<String, OutOfRange> {
    let all: Vec<&str> = lines(text).collect();
    let line_count = all.len();
    let out_of_range = OutOfRange { line_count };
    if !range.fits(line_count) {
        return Err(out_of_range);
    }

    let before = all.get(..range.start() - 1).ok_or(out_of_range)?;
    let after = all.get(range.end()..).ok_or(out_of_range)?;
    let last_replaced = all.get(range.end() - 1).ok_or(out_of_range)?;

    let block = replacement.as_str();
    let mut spliced = String::with_capacity(text.len() + block.len());
    spliced.extend(before.iter().copied());
    spliced.push_str(block);
    if !block.ends_with('\n') {
        spliced.push_str(terminator(last_replaced));
    }
    spliced.extend(after.iter().copied());
    Ok(spliced)
}

fn terminator(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn apply(text: &str, start: usize, end: usize, block: &str) -> Result<String, OutOfRange> {
        splice(text, LineRange::new(start, end), &ReplacementText::from(block))
    }

    #[rstest]
    #[case("", 0)]
    #[case("\n", 1)]
    #[case("a", 1)]
    #[case("a\nb\n", 2)]
    #[case("a\nb", 2)]
    #[case("a\r\nb\r\n", 2)]
    fn counts_lines(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(lines(text).count(), expected);
    }

    #[test]
    fn replaces_middle_lines_with_a_multi_line_block() {
        let spliced = apply("a\nb\nc\nd\ne\n", 2, 3, "X\nY").expect("splice");
        assert_eq!(spliced, "a\nX\nY\nd\ne\n");
    }

    #[rstest]
    #[case("a\nb\nc\n", 1, 1, "Z", "Z\nb\nc\n")]
    #[case("a\nb\nc\n", 3, 3, "Z", "a\nb\nZ\n")]
    #[case("a\nb\nc\n", 1, 3, "only", "only\n")]
    #[case("a\nb\nc\n", 2, 2, "", "a\n\nc\n")]
    #[case("a\nb\nc\n", 2, 2, "kept\n", "a\nkept\nc\n")]
    #[case("a\nb\nc", 3, 3, "Z", "a\nb\nZ")]
    #[case("a\nb\nc", 2, 3, "Z\n", "a\nZ\n")]
    fn splices_at_boundaries(
        #[case] text: &str,
        #[case] start: usize,
        #[case] end: usize,
        #[case] block: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(apply(text, start, end, block).expect("splice"), expected);
    }

    #[test]
    fn keeps_crlf_terminators() {
        let spliced = apply("a\r\nb\r\nc\r\n", 2, 2, "B").expect("splice");
        assert_eq!(spliced, "a\r\nB\r\nc\r\n");
    }

    #[rstest]
    #[case("a\nb\nc\n", 4, 4)]
    #[case("a\nb\nc\n", 0, 1)]
    #[case("a\nb\nc\n", 3, 2)]
    #[case("a\nb\nc\n", 2, 9)]
    #[case("", 1, 1)]
    fn rejects_ranges_outside_the_text(
        #[case] text: &str,
        #[case] start: usize,
        #[case] end: usize,
    ) {
        let error = apply(text, start, end, "x").expect_err("out of range");
        assert_eq!(error.line_count, lines(text).count());
    }
}
