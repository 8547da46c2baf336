//! Run report types.

use serde::Serialize;

use crate::merge::{BlockChange, MarkerPair, MarkerScan};

/// Facts about the inputs, gathered before any decision is made.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Diagnostics {
    /// PR author as configured (`None` when unset or empty).
    pub pr_author: Option<String>,
    /// README length in characters.
    pub content_length: usize,
    /// Which markers were found in the README.
    #[serde(flatten)]
    pub markers: MarkerScan,
}

impl Diagnostics {
    /// Collect diagnostics for `content`.
    #[must_use]
    pub fn collect(content: &str, pr_author: Option<&str>, markers: &MarkerPair) -> Self {
        Self {
            pr_author: pr_author.map(ToOwned::to_owned),
            content_length: content.chars().count(),
            markers: markers.scan(content),
        }
    }
}

/// What a run did to the README.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum UpdateOutcome {
    /// The PR author is already linked; nothing was rendered or written.
    AuthorAlreadyListed {
        /// The author that was found.
        author: String,
    },
    /// The marker block already holds the current table; nothing was written.
    Unchanged,
    /// The README was written.
    Updated {
        /// Contributor rows in the new table.
        rows: usize,
        /// Whether the block was replaced or appended.
        block: BlockChange,
    },
}

impl UpdateOutcome {
    /// Whether the README was written.
    #[must_use]
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct UpdateReport {
    /// Pre-decision diagnostics.
    pub diagnostics: Diagnostics,
    /// Final outcome.
    pub outcome: UpdateOutcome,
}

impl UpdateReport {
    /// Pair diagnostics with the outcome they preceded.
    #[must_use]
    pub fn new(diagnostics: Diagnostics, outcome: UpdateOutcome) -> Self {
        Self {
            diagnostics,
            outcome,
        }
    }
}
