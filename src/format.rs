//! Fixed-width field formatting.
//!
//! Every ABA line is exactly [`LINE_WIDTH`] characters. The helpers here never
//! fail on oversized input: text is truncated to its column and numbers lose
//! their most significant digits. Free text goes through [`sanitize`] first so
//! that multi-byte characters can't shift later columns.

use crate::error::{AbaError, Result};
use std::iter;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Width of every record payload, terminator excluded.
pub const LINE_WIDTH: usize = 120;

/// Left-justifies `text` in a column of exactly `width` characters.
///
/// Short input is filled with `fill`, long input is cut off.
///
/// ```
/// use aba::format::pad_right;
///
/// assert_eq!(pad_right("ABC", 5, ' '), "ABC  ");
/// assert_eq!(pad_right("ABCDEFG", 5, '#'), "ABCDE");
/// ```
pub fn pad_right(text: &str, width: usize, fill: char) -> String {
    text.chars().chain(iter::repeat(fill)).take(width).collect()
}

/// Right-justifies `text` in a column of exactly `width` characters.
///
/// Long input keeps its first `width` characters.
pub fn pad_left(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    iter::repeat(fill).take(width - len).chain(text.chars()).collect()
}

/// A run of `count` blanks.
pub fn spaces(count: usize) -> String {
    " ".repeat(count)
}

/// Renders `value` right-justified with leading zeros in exactly `width` digits.
///
/// Values wider than the column keep only their `width` least significant digits.
///
/// ```
/// use aba::format::zero_fill;
///
/// assert_eq!(zero_fill(1000, 10), "0000001000");
/// assert_eq!(zero_fill(123456, 4), "3456");
/// ```
pub fn zero_fill(value: u64, width: usize) -> String {
    let digits = format!("{:0width$}", value, width = width);
    digits[digits.len() - width..].to_string()
}

/// Reduces `text` to printable ASCII.
///
/// Accented characters are decomposed and their combining marks dropped, so
/// `"Café"` becomes `"Cafe"`. Anything left outside `' '..='~'` is removed.
pub fn sanitize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| (' '..='~').contains(c))
        .collect()
}

/// Removes a trailing `\n` or `\r\n`.
pub(crate) fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Checks the payload width of a line.
pub(crate) fn expect_width(line: &str) -> Result<()> {
    if line.len() != LINE_WIDTH {
        return Err(AbaError::MalformedLine {
            expected: LINE_WIDTH,
            actual: line.len(),
        });
    }
    Ok(())
}

/// Checks that a line starts with the given record-type tag.
pub(crate) fn expect_tag(line: &str, tag: u8) -> Result<()> {
    match line.as_bytes().first() {
        Some(&byte) if byte == tag => Ok(()),
        Some(&byte) => Err(AbaError::UnexpectedRecordType { byte }),
        None => Err(AbaError::MalformedLine {
            expected: LINE_WIDTH,
            actual: 0,
        }),
    }
}

/// Extracts the trimmed text at byte range `start..end`.
///
/// Works on bytes so that stray non-ASCII input can't split a character.
pub(crate) fn field(line: &str, start: usize, end: usize) -> String {
    String::from_utf8_lossy(&line.as_bytes()[start..end])
        .trim()
        .to_string()
}

/// Extracts a number at byte range `start..end`, zero when it doesn't parse.
pub(crate) fn number_field(line: &str, start: usize, end: usize) -> u64 {
    field(line, start, end).parse().unwrap_or_default()
}
