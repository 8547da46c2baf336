#![allow(clippy::unwrap_used)]
//! End-to-end tests for the `update-contributors` binary.
//!
//! Each test runs the binary in a temporary working directory with a
//! controlled environment and checks stdout, stderr, the exit code and the
//! README left on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

const ALICE: &str = r#"[{"login":"alice","avatar_url":"u1","html_url":"h1"}]"#;

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_update-contributors"));
    cmd.current_dir(dir)
        .env_remove("PR_AUTHOR")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> (i32, String, String) {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output().unwrap();
    (
        status.code().unwrap(),
        String::from_utf8(stdout).unwrap(),
        String::from_utf8(stderr).unwrap(),
    )
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Success paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_creates_readme_with_table() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);

    let (code, stdout, _) = run(command(tmp.path()).env("GITHUB_REPOSITORY", "org/repo"));

    assert_eq!(code, 0);
    assert!(stdout.contains("DEBUG: PR_AUTHOR = (unset)\n"), "got: {stdout}");
    assert!(stdout.contains("DEBUG: Content length = 0\n"));
    assert!(stdout.contains("DEBUG: Start marker found = false\n"));
    assert!(stdout.contains("DEBUG: End marker found = false\n"));
    assert!(stdout.ends_with("README.md successfully updated with the contributors list.\n"));

    let readme = read(tmp.path(), "README.md");
    assert!(readme.contains("<a href=\"h1\">alice</a>"));
    assert!(readme.contains("https://github.com/org/repo/graphs/contributors"));
}

#[test]
fn test_second_run_reports_no_changes() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);
    write(tmp.path(), "README.md", "# Project\n");

    let (code, _, _) = run(command(tmp.path()).env("GITHUB_REPOSITORY", "org/repo"));
    assert_eq!(code, 0);
    let first = read(tmp.path(), "README.md");

    let (code, stdout, _) = run(command(tmp.path()).env("GITHUB_REPOSITORY", "org/repo"));
    assert_eq!(code, 0);
    assert!(stdout.contains("DEBUG: Start marker found = true\n"));
    assert!(stdout.ends_with(
        "No changes detected in the contributors list. README.md will not be updated.\n"
    ));
    assert_eq!(read(tmp.path(), "README.md"), first);
}

#[test]
fn test_no_change_exit_code_is_configurable() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);

    let (code, _, _) = run(command(tmp.path()).args(["--repository", "org/repo"]));
    assert_eq!(code, 0);

    let (code, _, _) = run(command(tmp.path()).args([
        "--repository",
        "org/repo",
        "--no-change-exit-code",
        "3",
    ]));
    assert_eq!(code, 3);
}

#[test]
fn test_listed_pr_author_skips_update() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);
    let original = "# Project\n\n<a href=\"h1\">alice</a>\n";
    write(tmp.path(), "README.md", original);

    let (code, stdout, _) = run(command(tmp.path()).env("PR_AUTHOR", "alice"));

    assert_eq!(code, 0);
    assert!(stdout.contains("DEBUG: PR_AUTHOR = alice\n"));
    assert!(stdout.ends_with("User alice is already in README.md. Skipping update.\n"));
    assert_eq!(read(tmp.path(), "README.md"), original);
}

#[test]
fn test_flag_overrides_environment() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);

    let (code, _, _) = run(command(tmp.path())
        .env("GITHUB_REPOSITORY", "env/repo")
        .args(["--repository", "flag/repo"]));

    assert_eq!(code, 0);
    let readme = read(tmp.path(), "README.md");
    assert!(readme.contains("https://github.com/flag/repo/graphs/contributors"));
    assert!(!readme.contains("env/repo"));
}

#[test]
fn test_custom_paths_and_excludes() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("docs")).unwrap();
    write(
        tmp.path(),
        "people.json",
        r#"[{"login":"alice","avatar_url":"u1","html_url":"h1"},
            {"login":"renovate[bot]","avatar_url":"u2","html_url":"h2"}]"#,
    );

    let (code, stdout, _) = run(command(tmp.path()).args([
        "--contributors",
        "people.json",
        "--readme",
        "docs/INDEX.md",
        "--exclude",
        "renovate[bot]",
    ]));

    assert_eq!(code, 0);
    assert!(stdout.ends_with("INDEX.md successfully updated with the contributors list.\n"));
    let readme = read(tmp.path(), "docs/INDEX.md");
    assert!(readme.contains(">alice</a>"));
    assert!(!readme.contains("renovate"));
}

#[test]
fn test_json_format_emits_report() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);

    let (code, stdout, _) = run(command(tmp.path()).args(["--format", "json"]));

    assert_eq!(code, 0);
    assert!(!stdout.contains("DEBUG:"));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"]["status"], "updated");
    assert_eq!(json["outcome"]["rows"], 1);
    assert_eq!(json["outcome"]["block"], "appended");
    assert_eq!(json["diagnostics"]["content_length"], 0);
    assert!(json["diagnostics"]["pr_author"].is_null());
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_malformed_json_exits_one() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", "[{\"login\": ");

    let (code, stdout, stderr) = run(&mut command(tmp.path()));

    assert_eq!(code, 1);
    assert!(stderr.contains("Error parsing contributors.json: "), "got: {stderr}");
    assert!(!stdout.contains("DEBUG:"));
    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn test_missing_contributors_file_exits_one() {
    let tmp = TempDir::new().unwrap();

    let (code, _, stderr) = run(&mut command(tmp.path()));

    assert_eq!(code, 1);
    assert!(stderr.contains("File not found: contributors.json"), "got: {stderr}");
}

#[test]
fn test_incomplete_record_exits_one() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", r#"[{"login":"alice"}]"#);

    let (code, _, stderr) = run(&mut command(tmp.path()));

    assert_eq!(code, 1);
    assert!(stderr.contains("Unexpected error updating README"), "got: {stderr}");
}

#[test]
fn test_invalid_arguments_exit_two() {
    let tmp = TempDir::new().unwrap();

    let (code, _, stderr) = run(command(tmp.path()).args(["--format", "yaml"]));

    assert_eq!(code, 2);
    assert!(stderr.contains("--format"), "got: {stderr}");
}

#[test]
fn test_non_utf8_readme_exits_one_as_unexpected() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);
    fs::write(tmp.path().join("README.md"), [0xff, 0xfe]).unwrap();

    let (code, _, stderr) = run(&mut command(tmp.path()));

    assert_eq!(code, 1);
    assert!(
        stderr.contains("Unexpected error updating README: README.md is not valid UTF-8"),
        "got: {stderr}"
    );
}

#[test]
fn test_json_format_reports_diagnostics_on_failure() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contributors.json", ALICE);
    let readme = "<!-- CONTRIBUTORS END -->\n# Project\n<!-- CONTRIBUTORS START -->\n";
    write(tmp.path(), "README.md", readme);

    let (code, stdout, stderr) = run(command(tmp.path()).args(["--format", "json"]));

    assert_eq!(code, 1);
    assert!(stderr.contains("Unexpected error updating README: marker"), "got: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["diagnostics"]["start_found"], true);
    assert_eq!(json["diagnostics"]["end_found"], true);
    assert!(json.get("outcome").is_none());
    assert_eq!(read(tmp.path(), "README.md"), readme);
}
