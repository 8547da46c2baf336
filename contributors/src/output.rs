//! Shared output formatting for update runs.
//!
//! Plain-text and JSON formatters. Color and exit codes belong to the CLI.

use std::io::Write;

use serde::Serialize;

use crate::report::{Diagnostics, UpdateOutcome, UpdateReport};

/// Write the pre-decision diagnostic lines.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_diagnostics(diagnostics: &Diagnostics, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "DEBUG: PR_AUTHOR = {}",
        diagnostics.pr_author.as_deref().unwrap_or("(unset)")
    )?;
    writeln!(writer, "DEBUG: Content length = {}", diagnostics.content_length)?;
    writeln!(
        writer,
        "DEBUG: Start marker found = {}",
        diagnostics.markers.start_found
    )?;
    writeln!(
        writer,
        "DEBUG: End marker found = {}",
        diagnostics.markers.end_found
    )?;
    Ok(())
}

/// One-line human summary of `outcome`; `readme` is the file name shown to the user.
#[must_use]
pub fn outcome_message(outcome: &UpdateOutcome, readme: &str) -> String {
    match outcome {
        UpdateOutcome::AuthorAlreadyListed { author } => {
            format!("User {author} is already in {readme}. Skipping update.")
        }
        UpdateOutcome::Unchanged => {
            format!("No changes detected in the contributors list. {readme} will not be updated.")
        }
        UpdateOutcome::Updated { .. } => {
            format!("{readme} successfully updated with the contributors list.")
        }
    }
}

/// Format an `UpdateReport` as human-readable text: diagnostics, then the outcome line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(
    report: &UpdateReport,
    readme: &str,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    write_diagnostics(&report.diagnostics, writer)?;
    writeln!(writer, "{}", outcome_message(&report.outcome, readme))?;
    Ok(())
}

/// Format diagnostics alone as pretty-printed JSON, for runs that fail after
/// the inputs were loaded.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_diagnostics_json(
    diagnostics: &Diagnostics,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    #[derive(Serialize)]
    struct DiagnosticsOnly<'a> {
        diagnostics: &'a Diagnostics,
    }

    let json = serde_json::to_string_pretty(&DiagnosticsOnly { diagnostics })?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format an `UpdateReport` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &UpdateReport, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
