//! Error types for the README update pipeline.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::merge::MergeError;

/// Coarse classification used to pick the stderr prefix.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// The contributor list is not valid JSON.
    Parse,
    /// A required file does not exist.
    NotFound,
    /// Any other I/O failure (permission denied, disk full).
    Io,
    /// Everything else: malformed records, bad encoding, corrupt marker blocks.
    Unexpected,
}

impl ErrorKind {
    /// Text printed in front of the error detail on stderr.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Parse => "Error parsing ",
            Self::NotFound => "File not found: ",
            Self::Io => "I/O error: ",
            Self::Unexpected => "Unexpected error updating README: ",
        }
    }
}

/// Errors produced while loading, merging or writing.
///
/// `Display` gives the detail only; prepend [`ErrorKind::prefix`] of
/// [`UpdateError::kind`] for the full user-facing line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpdateError {
    /// The contributor file is not syntactically valid JSON.
    #[error("{}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The contributor file is valid JSON but not an array of records
    /// with string `login`, `avatar_url` and `html_url` fields.
    #[error("invalid contributor record in {}: {source}", path.display())]
    InvalidRecord {
        /// File holding the bad record.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// A file is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", path.display())]
    InvalidEncoding {
        /// File with the bad bytes.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A required file is missing.
    #[error("{}: {source}", path.display())]
    NotFound {
        /// Missing file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Any other I/O failure.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The existing marker block cannot be merged.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl UpdateError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidRecord { .. } | Self::InvalidEncoding { .. } | Self::Merge(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

/// Build an I/O error for `path`, keeping "not found" and bad UTF-8 distinct
/// from other failures.
pub fn io_error(path: &Path, source: io::Error) -> UpdateError {
    let path = path.to_path_buf();
    match source.kind() {
        io::ErrorKind::NotFound => UpdateError::NotFound { path, source },
        // `read_to_string` reports invalid UTF-8 as `InvalidData`.
        io::ErrorKind::InvalidData => UpdateError::InvalidEncoding { path, source },
        _ => UpdateError::Io { path, source },
    }
}

/// Build a JSON error for `path`, separating syntax problems from shape problems.
pub fn json_error(path: &Path, source: serde_json::Error) -> UpdateError {
    let path = path.to_path_buf();
    match source.classify() {
        serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
            UpdateError::Parse { path, source }
        }
        serde_json::error::Category::Data | serde_json::error::Category::Io => {
            UpdateError::InvalidRecord { path, source }
        }
    }
}
