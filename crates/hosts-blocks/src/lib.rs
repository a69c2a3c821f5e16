//! Managed block merging for hosts-blocker.
//!
//! A managed block is the region of a hosts file owned by this tool:
//!
//! ```text
//! # BEGIN HOSTS BLOCKER ENTRIES
//! 0.0.0.0 ads.example.com
//! # END HOSTS BLOCKER ENTRIES
//! ```
//!
//! [`BlockMerger::merge`] removes any existing block and, when given a
//! payload, appends a fresh one at the end of the document. Everything
//! outside the block is preserved byte for byte, and merging the same
//! payload twice gives the same document as merging it once.
//!
//! Block boundaries follow a loose rule: the first start marker and the
//! nearest end marker after it, matched as plain substrings. A start marker
//! without a following end marker is not a block.
//!
//! ```
//! use hosts_blocks::merge;
//!
//! let added = merge("a.com 1.2.3.4\n", Some("b.com 5.6.7.8"));
//! assert_eq!(
//!     added,
//!     "a.com 1.2.3.4\n# BEGIN HOSTS BLOCKER ENTRIES\nb.com 5.6.7.8\n# END HOSTS BLOCKER ENTRIES\n"
//! );
//! assert_eq!(merge(&added, None), "a.com 1.2.3.4\n");
//! ```

pub mod error;
pub mod marker;
pub mod parser;
pub mod writer;

pub use error::{Error, Result};
pub use marker::{DEFAULT_END_MARKER, DEFAULT_START_MARKER, Markers};
pub use parser::{BlockSpan, count_entries, find_block, find_blocks, has_block};
pub use writer::{BlockMerger, merge, remove_block, upsert_block};
