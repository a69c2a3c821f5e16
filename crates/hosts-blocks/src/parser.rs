//! Locating managed blocks inside a document.
//!
//! A block spans from the start marker through the nearest following end
//! marker, plus at most one newline after it:
//! ```text
//! # BEGIN HOSTS BLOCKER ENTRIES
//! content here
//! # END HOSTS BLOCKER ENTRIES
//! ```

use crate::marker::Markers;

/// A managed block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// Byte offset of the first character of the start marker.
    pub start: usize,
    /// Byte offset one past the excised region (end marker plus at most one
    /// trailing newline).
    pub end: usize,
    /// The text between the markers, without the line terminator that
    /// follows the start marker or the one that precedes the end marker.
    pub content: String,
    /// The 1-based line number of the start marker.
    pub start_line: usize,
    /// The 1-based line number of the end marker.
    pub end_line: usize,
}

impl BlockSpan {
    /// Number of non-blank, non-comment lines inside the block.
    pub fn entry_count(&self) -> usize {
        count_entries(&self.content)
    }
}

/// Count non-blank lines that are not `#` comments.
pub fn count_entries(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}

/// Finds every non-overlapping block, left to right.
///
/// # Example
/// ```
/// use hosts_blocks::{Markers, find_blocks};
///
/// let doc = "x\n# BEGIN HOSTS BLOCKER ENTRIES\n0.0.0.0 a\n# END HOSTS BLOCKER ENTRIES\n";
/// let blocks = find_blocks(doc, &Markers::default());
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].content, "0.0.0.0 a");
/// assert_eq!(blocks[0].start_line, 2);
/// ```
pub fn find_blocks(document: &str, markers: &Markers) -> Vec<BlockSpan> {
    markers
        .pattern()
        .find_iter(document)
        .map(|found| {
            let inner_start = found.start() + markers.start().len();
            let matched = found.as_str();
            let end_marker_at = found.start() + end_marker_offset(matched, markers);
            let raw = &document[inner_start..end_marker_at];
            let content = strip_terminator_prefix(raw);
            let content = strip_terminator_suffix(content);

            BlockSpan {
                start: found.start(),
                end: found.end(),
                content: content.to_string(),
                start_line: line_of(document, found.start()),
                end_line: line_of(document, end_marker_at),
            }
        })
        .collect()
}

/// Finds the authoritative block: the first start marker and the nearest
/// end marker after it.
pub fn find_block(document: &str, markers: &Markers) -> Option<BlockSpan> {
    find_blocks(document, markers).into_iter().next()
}

/// Checks whether the document holds a complete block.
pub fn has_block(document: &str, markers: &Markers) -> bool {
    markers.pattern().is_match(document)
}

/// Offset of the end marker within a matched span.
///
/// The lazy match ends at the first end marker after the start marker, so
/// the end marker sits at the tail of the span, before the optional newline.
fn end_marker_offset(matched: &str, markers: &Markers) -> usize {
    strip_terminator_suffix(matched).len() - markers.end().len()
}

fn strip_terminator_prefix(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

fn strip_terminator_suffix(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

fn line_of(document: &str, offset: usize) -> usize {
    document[..offset].matches('\n').count() + 1
}
