//! Reading and writing the files the pipeline works on.
//!
//! Each file is opened, fully read or written, and closed before the next
//! stage starts.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::UpdateConfig;
use crate::error::{UpdateError, io_error, json_error};

/// One contributor as returned by the repository contributors API.
///
/// Fields beyond these three are ignored. A key repeated within one record
/// takes its last value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// Account name, unique per contributor.
    pub login: String,
    /// Avatar image URL (without size parameter).
    pub avatar_url: String,
    /// Profile page URL.
    pub html_url: String,
}

/// Everything read from disk for one run.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Contributor records in file order.
    pub contributors: Vec<ContributorRecord>,
    /// Current README text; empty when the file does not exist.
    pub readme: String,
}

impl Inputs {
    /// Load the contributor list, then the README.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`load_contributors`] or [`read_readme`].
    pub fn load(config: &UpdateConfig) -> Result<Self, UpdateError> {
        let contributors = load_contributors(&config.contributors_path)?;
        let readme = read_readme(&config.readme_path)?;
        Ok(Self {
            contributors,
            readme,
        })
    }
}

/// Read a JSON array of contributor records.
///
/// # Errors
///
/// - [`UpdateError::NotFound`] if the file does not exist
/// - [`UpdateError::InvalidEncoding`] if the file is not valid UTF-8
/// - [`UpdateError::Io`] for other read failures
/// - [`UpdateError::Parse`] if the content is not valid JSON
/// - [`UpdateError::InvalidRecord`] if the JSON is not an array of complete records
pub fn load_contributors(path: &Path) -> Result<Vec<ContributorRecord>, UpdateError> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    // Through `Value` so duplicate keys resolve last-wins instead of failing.
    let document: Value = serde_json::from_str(&content).map_err(|e| json_error(path, e))?;
    let records: Vec<ContributorRecord> =
        serde_json::from_value(document).map_err(|e| json_error(path, e))?;
    debug!(path = %path.display(), count = records.len(), "loaded contributor records");
    Ok(records)
}

/// Read the README, treating a missing file as empty.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidEncoding`] if the file is not valid UTF-8, or
/// [`UpdateError::Io`] for any other failure except the file being absent.
pub fn read_readme(path: &Path) -> Result<String, UpdateError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "read README");
            Ok(content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "README does not exist, starting from empty content");
            Ok(String::new())
        }
        Err(e) => Err(io_error(path, e)),
    }
}

/// Overwrite the README with `content` as UTF-8.
///
/// # Errors
///
/// Returns [`UpdateError::NotFound`] if the parent directory is missing,
/// or [`UpdateError::Io`] for any other write failure.
pub fn write_readme(path: &Path, content: &str) -> Result<(), UpdateError> {
    fs::write(path, content).map_err(|e| io_error(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote README");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_ignores_extra_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(
            &path,
            r#"[{"login":"alice","id":1,"avatar_url":"u1","html_url":"h1","contributions":7}]"#,
        )
        .unwrap();

        let records = load_contributors(&path).unwrap();
        assert_eq!(
            records,
            vec![ContributorRecord {
                login: "alice".to_owned(),
                avatar_url: "u1".to_owned(),
                html_url: "h1".to_owned(),
            }]
        );
    }

    #[test]
    fn test_load_missing_field_fails_fast() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(&path, r#"[{"login":"alice","avatar_url":"u1"}]"#).unwrap();

        let err = load_contributors(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().contains("html_url"), "got: {err}");
    }

    #[test]
    fn test_load_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(&path, "[{\"login\": ").unwrap();

        let err = load_contributors(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_contributors(&tmp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_readme_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let content = read_readme(&tmp.path().join("README.md")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_readme_non_utf8_is_unexpected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_readme(&path).unwrap_err();
        assert!(matches!(err, UpdateError::InvalidEncoding { .. }));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_contributors_non_utf8_is_unexpected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(&path, b"[\xff]").unwrap();

        let err = load_contributors(&path).unwrap_err();
        assert!(matches!(err, UpdateError::InvalidEncoding { .. }));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(
            &path,
            r#"[{"login":"old","avatar_url":"u1","html_url":"h1","login":"alice"}]"#,
        )
        .unwrap();

        let records = load_contributors(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].login, "alice");
    }

    #[test]
    fn test_load_top_level_object_is_invalid_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contributors.json");
        fs::write(&path, r#"{"login":"alice"}"#).unwrap();

        let err = load_contributors(&path).unwrap_err();
        assert!(matches!(err, UpdateError::InvalidRecord { .. }));
    }

    #[test]
    fn test_write_preserves_unicode() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        write_readme(&path, "Zo\u{eb} \u{1f4c8}\n").unwrap();
        assert_eq!(read_readme(&path).unwrap(), "Zo\u{eb} \u{1f4c8}\n");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = write_readme(&tmp.path().join("missing").join("README.md"), "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
