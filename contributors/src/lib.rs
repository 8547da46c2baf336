//! # readme-contributors
//!
//! Keeps a contributors table inside a README in sync with a JSON list of
//! contributor records.
//!
//! One run is a linear pipeline: load the contributor list and the README,
//! render an HTML table of the non-bot contributors, merge it between the
//! `<!-- CONTRIBUTORS START -->` / `<!-- CONTRIBUTORS END -->` markers, and
//! write the README only if something changed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use readme_contributors::{UpdateConfig, update_readme};
//!
//! let mut config = UpdateConfig::default();
//! config.render.repository = Some("octo/project".to_owned());
//!
//! let report = update_readme(&config).unwrap();
//! println!("README written: {}", report.outcome.wrote());
//! ```
//!
//! The stages are also exposed separately ([`Inputs::load`],
//! [`Diagnostics::collect`], [`plan_update`], [`apply_plan`]) so a driver can
//! report diagnostics before any decision is made.

mod config;
mod error;
pub mod merge;
pub mod output;
pub mod render;
mod report;
pub mod source;

use std::path::Path;

use tracing::{debug, info};

pub use config::{
    DEFAULT_AVATAR_SIZE, DEFAULT_CONTRIBUTORS_PATH, DEFAULT_EXCLUDED_LOGINS, DEFAULT_README_PATH,
    RenderOptions, UpdateConfig,
};
pub use error::{ErrorKind, UpdateError};
pub use merge::{MarkerPair, MergeError};
pub use render::RenderedFragment;
pub use report::{Diagnostics, UpdateOutcome, UpdateReport};
pub use source::{ContributorRecord, Inputs};

use merge::MergeResult;

/// What a run will do, decided before touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Nothing to write.
    Skip(UpdateOutcome),
    /// Write `content` to the README.
    Write {
        /// New README text.
        content: String,
        /// Outcome to report once written.
        outcome: UpdateOutcome,
    },
}

/// Decide what to do with the loaded inputs.
///
/// The author pre-check runs first and skips rendering entirely when the PR
/// author is already linked in the README.
///
/// # Errors
///
/// Returns [`UpdateError::Merge`] if the existing marker block is out of order.
pub fn plan_update(inputs: &Inputs, config: &UpdateConfig) -> Result<UpdatePlan, UpdateError> {
    if let Some(author) = config.effective_pr_author()
        && merge::author_already_listed(&inputs.readme, author)
    {
        info!(author, "PR author already listed, skipping update");
        return Ok(UpdatePlan::Skip(UpdateOutcome::AuthorAlreadyListed {
            author: author.to_owned(),
        }));
    }

    let fragment = render::render_fragment(&inputs.contributors, &config.render);
    let plan = match merge::merge_section(&inputs.readme, fragment.as_str(), &config.markers)? {
        MergeResult::Unchanged => UpdatePlan::Skip(UpdateOutcome::Unchanged),
        MergeResult::Changed { content, change } => UpdatePlan::Write {
            content,
            outcome: UpdateOutcome::Updated {
                rows: fragment.rows(),
                block: change,
            },
        },
    };
    debug!(
        write = matches!(plan, UpdatePlan::Write { .. }),
        "planned README update"
    );
    Ok(plan)
}

/// Carry out `plan` against the README at `readme_path`.
///
/// # Errors
///
/// Returns an error if the README cannot be written.
pub fn apply_plan(plan: UpdatePlan, readme_path: &Path) -> Result<UpdateOutcome, UpdateError> {
    match plan {
        UpdatePlan::Skip(outcome) => Ok(outcome),
        UpdatePlan::Write { content, outcome } => {
            source::write_readme(readme_path, &content)?;
            info!(path = %readme_path.display(), "README updated");
            Ok(outcome)
        }
    }
}

/// Run the whole pipeline: load, diagnose, plan, apply.
///
/// # Errors
///
/// Returns an error if loading, merging or writing fails. See [`UpdateError`].
pub fn update_readme(config: &UpdateConfig) -> Result<UpdateReport, UpdateError> {
    let inputs = Inputs::load(config)?;
    let diagnostics =
        Diagnostics::collect(&inputs.readme, config.effective_pr_author(), &config.markers);
    let plan = plan_update(&inputs, config)?;
    let outcome = apply_plan(plan, &config.readme_path)?;
    Ok(UpdateReport {
        diagnostics,
        outcome,
    })
}
