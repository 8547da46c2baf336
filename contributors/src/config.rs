//! Configuration types for a README update run.
//!
//! Every input the pipeline needs is carried here explicitly. The library
//! never consults environment variables; layering flags and environment over
//! these defaults is the CLI's concern.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::merge::MarkerPair;

/// Default location of the contributor list.
pub const DEFAULT_CONTRIBUTORS_PATH: &str = "contributors.json";

/// Default location of the README to update.
pub const DEFAULT_README_PATH: &str = "README.md";

/// Bot and automation accounts that never appear in the table.
pub const DEFAULT_EXCLUDED_LOGINS: &[&str] =
    &["actions-user", "github-actions[bot]", "GitHub Action"];

/// Default avatar edge length in pixels.
pub const DEFAULT_AVATAR_SIZE: u32 = 50;

/// Options for the filter & render stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RenderOptions {
    /// Logins dropped from the table (exact, case-sensitive match).
    pub excluded_logins: BTreeSet<String>,
    /// `owner/name` used to build the insights link.
    /// `None` renders an empty segment; the link is not validated.
    pub repository: Option<String>,
    /// Avatar size in pixels, used for the `s` query parameter and the image box.
    pub avatar_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            excluded_logins: DEFAULT_EXCLUDED_LOGINS
                .iter()
                .map(|login| (*login).to_owned())
                .collect(),
            repository: None,
            avatar_size: DEFAULT_AVATAR_SIZE,
        }
    }
}

/// Full configuration of one update run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct UpdateConfig {
    /// JSON array of contributor records.
    pub contributors_path: PathBuf,
    /// README file to read and rewrite. A missing file is treated as empty.
    pub readme_path: PathBuf,
    /// Marker literals delimiting the generated block.
    pub markers: MarkerPair,
    /// Author of the triggering pull request.
    /// When set and already linked in the README, the run stops early.
    pub pr_author: Option<String>,
    /// Rendering options.
    pub render: RenderOptions,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            contributors_path: PathBuf::from(DEFAULT_CONTRIBUTORS_PATH),
            readme_path: PathBuf::from(DEFAULT_README_PATH),
            markers: MarkerPair::default(),
            pr_author: None,
            render: RenderOptions::default(),
        }
    }
}

impl UpdateConfig {
    /// The PR author, if set to a non-empty value.
    #[must_use]
    pub fn effective_pr_author(&self) -> Option<&str> {
        self.pr_author.as_deref().filter(|author| !author.is_empty())
    }

    /// File name of the README for user-facing messages.
    #[must_use]
    pub fn readme_display_name(&self) -> String {
        self.readme_path.file_name().map_or_else(
            || self.readme_path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}
