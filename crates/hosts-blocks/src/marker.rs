//! Start and end markers bounding the managed block.

use crate::error::{Error, Result};
use regex::Regex;

/// Default line opening the managed block.
pub const DEFAULT_START_MARKER: &str = "# BEGIN HOSTS BLOCKER ENTRIES";

/// Default line closing the managed block.
pub const DEFAULT_END_MARKER: &str = "# END HOSTS BLOCKER ENTRIES";

/// A validated pair of block markers together with the pattern that finds
/// the block they delimit.
///
/// The pattern is `START`, then anything (lazily), then `END`, then at most
/// one line terminator (`\n` or `\r\n`). Leftmost-first matching makes the first start marker and the
/// nearest end marker after it authoritative.
#[derive(Debug, Clone)]
pub struct Markers {
    start: String,
    end: String,
    pattern: Regex,
}

impl Markers {
    /// Build markers from literal start and end strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMarkers`] when either marker is blank, contains
    /// a line break, or both markers are equal.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let start = start.into();
        let end = end.into();

        for (name, marker) in [("start", &start), ("end", &end)] {
            if marker.trim().is_empty() {
                return Err(Error::InvalidMarkers {
                    message: format!("{name} marker is empty"),
                });
            }
            if marker.contains(['\n', '\r']) {
                return Err(Error::InvalidMarkers {
                    message: format!("{name} marker spans more than one line"),
                });
            }
        }
        if start == end {
            return Err(Error::InvalidMarkers {
                message: "start and end markers are identical".to_string(),
            });
        }

        let pattern = Regex::new(&format!(
            r"(?s){}.*?{}(?:\r?\n)?",
            regex::escape(&start),
            regex::escape(&end)
        ))?;

        Ok(Self {
            start,
            end,
            pattern,
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub(crate) fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Whether `text` contains either marker literal anywhere.
    pub fn appear_in(&self, text: &str) -> bool {
        text.contains(&self.start) || text.contains(&self.end)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
            .expect("default markers are valid")
    }
}

impl PartialEq for Markers {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Markers {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers() {
        let markers = Markers::default();
        assert_eq!(markers.start(), "# BEGIN HOSTS BLOCKER ENTRIES");
        assert_eq!(markers.end(), "# END HOSTS BLOCKER ENTRIES");
    }

    #[test]
    fn rejects_empty_marker() {
        assert!(Markers::new("  ", "# END").is_err());
        assert!(Markers::new("# BEGIN", "").is_err());
    }

    #[test]
    fn rejects_identical_markers() {
        let err = Markers::new("# BLOCK", "# BLOCK").unwrap_err();
        assert!(err.to_string().contains("identical"));
    }

    #[test]
    fn rejects_multiline_marker() {
        assert!(Markers::new("# BEGIN\nX", "# END").is_err());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let markers = Markers::new("# [start] (*)", "# [end] (+)").unwrap();
        assert!(markers.pattern().is_match("# [start] (*)\nx\n# [end] (+)\n"));
        assert!(!markers.pattern().is_match("# s (*)\nx\n# [end] (+)\n"));
    }

    #[test]
    fn pattern_consumes_crlf_terminator() {
        let markers = Markers::default();
        let doc = "# BEGIN HOSTS BLOCKER ENTRIES\r\nx\r\n# END HOSTS BLOCKER ENTRIES\r\nnext\r\n";
        let found = markers.pattern().find(doc).unwrap();
        assert_eq!(&doc[found.end()..], "next\r\n");
    }
}
