//! Marker-block merging.
//!
//! The README owns everything outside the marker pair; this module only ever
//! rewrites the text between the first start marker and the first end marker
//! after it, or appends a fresh block when the pair is not there.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Default opening marker.
pub const DEFAULT_START_MARKER: &str = "<!-- CONTRIBUTORS START -->";

/// Default closing marker.
pub const DEFAULT_END_MARKER: &str = "<!-- CONTRIBUTORS END -->";

/// Errors from merging into an existing marker block.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
    /// Both markers exist, but no end marker follows the first start marker.
    #[error("marker '{end}' does not follow marker '{start}'")]
    MarkersOutOfOrder {
        /// Start marker literal.
        start: String,
        /// End marker literal.
        end: String,
    },
}

/// The exact literals delimiting the generated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

/// Which markers were seen in a document.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MarkerScan {
    /// Start marker occurs somewhere in the text.
    pub start_found: bool,
    /// End marker occurs somewhere in the text.
    pub end_found: bool,
}

impl MarkerScan {
    /// Both markers occur, so the block is treated as present.
    #[must_use]
    pub fn both(self) -> bool {
        self.start_found && self.end_found
    }
}

impl MarkerPair {
    /// Create a marker pair from its literals.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Opening marker literal.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Closing marker literal.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Report which markers occur in `content`.
    #[must_use]
    pub fn scan(&self, content: &str) -> MarkerScan {
        MarkerScan {
            start_found: content.contains(&self.start),
            end_found: content.contains(&self.end),
        }
    }

    /// Wrap `fragment` in the marker pair, one per line, no trailing newline.
    #[must_use]
    pub fn wrap(&self, fragment: &str) -> String {
        format!("{}\n{fragment}\n{}", self.start, self.end)
    }
}

/// How the block ended up in the document.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockChange {
    /// An existing block was rewritten in place.
    Replaced,
    /// A new block was appended to the document.
    Appended,
}

/// Result of merging a fragment into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    /// The existing block already holds the fragment (ignoring surrounding whitespace).
    Unchanged,
    /// The document must be rewritten with this content.
    Changed {
        /// New document text.
        content: String,
        /// Whether the block was replaced or appended.
        change: BlockChange,
    },
}

/// True when `author` is non-empty and already linked in `content` as `">{author}</a>`.
#[must_use]
pub fn author_already_listed(content: &str, author: &str) -> bool {
    !author.is_empty() && content.contains(&format!("\">{author}</a>"))
}

/// Merge `fragment` into `content` between the markers.
///
/// With both markers present, the text between the first start marker and the
/// next end marker is compared (trimmed) against the fragment and replaced if
/// it differs; bytes outside the markers are kept as-is. Otherwise a new block
/// is appended after the trimmed content, separated by one blank line. A lone
/// marker does not count as a block, so a second block gets appended.
///
/// # Errors
///
/// Returns [`MergeError::MarkersOutOfOrder`] if both markers occur but the end
/// marker only appears before the first start marker.
pub fn merge_section(
    content: &str,
    fragment: &str,
    markers: &MarkerPair,
) -> Result<MergeResult, MergeError> {
    let scan = markers.scan(content);
    if !scan.both() {
        if scan.start_found || scan.end_found {
            warn!(
                start_found = scan.start_found,
                end_found = scan.end_found,
                "only one contributors marker present; appending a new block"
            );
        }
        let appended = format!("{}\n\n{}\n", content.trim_end(), markers.wrap(fragment));
        return Ok(MergeResult::Changed {
            content: appended,
            change: BlockChange::Appended,
        });
    }

    let out_of_order = || MergeError::MarkersOutOfOrder {
        start: markers.start.clone(),
        end: markers.end.clone(),
    };
    let (before, rest) = content
        .split_once(markers.start.as_str())
        .ok_or_else(out_of_order)?;
    let (current, after) = rest
        .split_once(markers.end.as_str())
        .ok_or_else(out_of_order)?;

    if current.trim() == fragment.trim() {
        return Ok(MergeResult::Unchanged);
    }

    Ok(MergeResult::Changed {
        content: format!("{before}{}{after}", markers.wrap(fragment)),
        change: BlockChange::Replaced,
    })
}
