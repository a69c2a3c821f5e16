//! Merging payloads into documents.
//!
//! Provides [`BlockMerger`] and the free functions [`merge`],
//! [`upsert_block`] and [`remove_block`], which use the default markers.

use crate::marker::Markers;
use std::borrow::Cow;
use std::sync::LazyLock;

static DEFAULT_MERGER: LazyLock<BlockMerger> = LazyLock::new(BlockMerger::default);

/// Splices managed blocks into documents using one set of markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMerger {
    markers: Markers,
}

impl BlockMerger {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Produce the updated document.
    ///
    /// Every existing block is excised first, together with at most one
    /// line terminator after its end marker. With a payload, a fresh block
    /// (`START\n<payload>\nEND\n`) is then appended to the end of the
    /// document; without one the excised document is returned as is.
    ///
    /// The appended block uses the document's line ending, taken from its
    /// first line. In a CRLF document the payload's bare `\n` terminators
    /// become `\r\n`; otherwise the payload is kept verbatim.
    ///
    /// # Example
    /// ```
    /// use hosts_blocks::BlockMerger;
    ///
    /// let merger = BlockMerger::default();
    /// let once = merger.merge("127.0.0.1 localhost\n", Some("0.0.0.0 ads.example"));
    /// let twice = merger.merge(&once, Some("0.0.0.0 ads.example"));
    /// assert_eq!(once, twice);
    /// ```
    pub fn merge(&self, document: &str, payload: Option<&str>) -> String {
        let excised = self.markers.pattern().replace_all(document, "");
        if excised.len() != document.len() {
            tracing::debug!(
                removed_bytes = document.len() - excised.len(),
                "Excised existing managed block"
            );
        }

        match payload {
            Some(payload) => {
                if self.markers.appear_in(payload) {
                    tracing::warn!(
                        "Payload contains a block marker; the next update may not find the block boundaries"
                    );
                }
                let ending = line_ending(&excised);
                let block = self.format_block(payload, ending);
                let mut merged = excised.into_owned();
                merged.push_str(&block);
                merged
            }
            None => excised.into_owned(),
        }
    }

    /// Install `payload` as the managed block.
    pub fn upsert(&self, document: &str, payload: &str) -> String {
        self.merge(document, Some(payload))
    }

    /// Remove the managed block, leaving everything else untouched.
    pub fn remove(&self, document: &str) -> String {
        self.merge(document, None)
    }

    fn format_block(&self, payload: &str, ending: &str) -> String {
        format!(
            "{}{ending}{}{ending}{}{ending}",
            self.markers.start(),
            with_line_ending(payload, ending),
            self.markers.end()
        )
    }
}

/// `\r\n` when the first line of `document` ends with it, else `\n`.
fn line_ending(document: &str) -> &'static str {
    match document.find('\n') {
        Some(at) if document[..at].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn with_line_ending<'a>(text: &'a str, ending: &str) -> Cow<'a, str> {
    if ending == "\n" {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace("\r\n", "\n").replace('\n', ending))
    }
}

/// Merge with the default markers. See [`BlockMerger::merge`].
pub fn merge(document: &str, payload: Option<&str>) -> String {
    DEFAULT_MERGER.merge(document, payload)
}

/// Install `payload` as the managed block, using the default markers.
pub fn upsert_block(document: &str, payload: &str) -> String {
    DEFAULT_MERGER.upsert(document, payload)
}

/// Remove the managed block, using the default markers.
pub fn remove_block(document: &str) -> String {
    DEFAULT_MERGER.remove(document)
}
