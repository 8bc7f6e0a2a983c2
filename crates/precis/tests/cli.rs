//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = "The cat sat. The cat sat on the hot mat. Cats sit.";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("PRECIS_SCALE_FACTOR")
        .env_remove("PRECIS_MATCH_MODE");
    cmd
}

/// A temp dir holding `name` with `contents`.
fn file_with(name: &str, contents: &str) -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    let path = path.to_str().unwrap().to_string();
    (tmp, path)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("summarize"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PRECIS_LOG_DIR"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Summarize Command
// =============================================================================

#[test]
fn summarize_file_prints_summary() {
    let (_tmp, path) = file_with("story.txt", FIXTURE);
    cmd()
        .args(["summarize", &path])
        .assert()
        .success()
        .stdout(predicate::str::diff("The cat sat.\n"));
}

#[test]
fn summarize_reads_stdin_when_no_file() {
    cmd()
        .arg("summarize")
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::diff("The cat sat.\n"));
}

#[test]
fn summarize_reads_stdin_for_dash() {
    cmd()
        .args(["summarize", "-"])
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::diff("The cat sat.\n"));
}

#[test]
fn summarize_scale_flag_changes_selection() {
    cmd()
        .args(["summarize", "--scale", "0.9"])
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::diff("The cat sat. Cats sit.\n"));
}

#[test]
fn summarize_high_scale_selects_nothing() {
    cmd()
        .args(["summarize", "--scale", "1.8"])
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn summarize_rejects_non_positive_scale() {
    cmd()
        .args(["summarize", "--scale", "0"])
        .write_stdin(FIXTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("scale"));
}

#[test]
fn summarize_match_mode_flag_accepted() {
    cmd()
        .args(["summarize", "--match-mode", "substring"])
        .write_stdin(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::diff("The cat sat.\n"));
}

#[test]
fn summarize_unknown_match_mode_fails() {
    cmd()
        .args(["summarize", "--match-mode", "fuzzy"])
        .write_stdin(FIXTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn summarize_json_outputs_report() {
    let output = cmd()
        .args(["--json", "summarize"])
        .write_stdin(FIXTURE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["text"], "The cat sat.");
    assert_eq!(json["outcome"], "summarized");
    assert_eq!(json["total_sentences"], 3);
    assert_eq!(json["scored_sentences"], 3);
    assert_eq!(json["threshold"], 2.5);
    assert_eq!(json["scale_factor"], 1.2);
    assert_eq!(json["match_mode"], "token");
    assert_eq!(json["sentences"][0]["index"], 0);
}

#[test]
fn summarize_empty_input_warns_and_succeeds() {
    let output = cmd()
        .args(["--json", "summarize"])
        .write_stdin("")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outcome"], "empty_input");

    cmd()
        .arg("summarize")
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no sentences"));
}

#[test]
fn summarize_stop_words_only_warns() {
    cmd()
        .arg("summarize")
        .write_stdin("It is what it is. So be it.")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("content word"));
}

#[test]
fn summarize_strips_markdown_files() {
    let doc = "---\ntitle: Cats\n---\n\n# Cats\n\nThe cat sat. The cat sat on the hot mat. Cats sit.\n\n```\nlet cat = 1;\n```\n";
    let (_tmp, path) = file_with("notes.md", doc);

    let output = cmd()
        .args(["--json", "summarize", &path])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_sentences"], 3);
    assert_eq!(json["text"], "The cat sat.");

    let output = cmd()
        .args(["--json", "summarize", "--no-markdown", &path])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_ne!(json["total_sentences"], 3);
}

#[test]
fn markdown_flags_conflict() {
    cmd()
        .args(["summarize", "--markdown", "--no-markdown"])
        .write_stdin(FIXTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn summarize_missing_file_fails() {
    cmd()
        .args(["summarize", "/nonexistent/story.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn summarize_enforces_input_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".precis.toml"), "max_input_bytes = 10\n").unwrap();
    fs::write(tmp.path().join("story.txt"), FIXTURE).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "summarize", "story.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "summarize"])
        .write_stdin(FIXTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn summarize_output_is_a_subsequence_of_input() {
    let story = "Rust is a systems programming language focused on safety. \
                 The Rust compiler checks memory safety at compile time. \
                 The weather was pleasant on the day of the release. \
                 Safety and speed make Rust a popular choice for systems work.";
    let output = cmd()
        .args(["--json", "summarize", "--scale", "0.8"])
        .write_stdin(story)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let selected = json["sentences"].as_array().unwrap();
    assert!(!selected.is_empty());
    let mut last = None;
    for s in selected {
        assert!(story.contains(s["text"].as_str().unwrap()));
        let index = s["index"].as_u64().unwrap();
        assert!(last.is_none_or(|prev| prev < index));
        last = Some(index);
    }
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Scale factor"));
}

#[test]
fn info_json_contains_expected_fields() {
    let output = cmd().args(["info", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["config"]["scale_factor"].is_number());
    assert!(json["config"]["match_mode"].is_string());
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn color_invalid_rejected() {
    cmd()
        .args(["--color", "sometimes", "info"])
        .assert()
        .failure();
}

#[test]
fn log_dir_env_writes_jsonl_file() {
    let tmp = TempDir::new().unwrap();
    let log_dir = tmp.path().join("logs");

    cmd()
        .env("PRECIS_LOG_DIR", &log_dir)
        .env("RUST_LOG", "debug")
        .arg("summarize")
        .write_stdin(FIXTURE)
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(&log_dir).unwrap().collect();
    assert!(!entries.is_empty(), "expected a log file in {log_dir:?}");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}

// =============================================================================
// Servers
// =============================================================================

#[cfg(feature = "mcp")]
#[test]
fn serve_help_available() {
    cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP"));
}

#[cfg(feature = "http")]
#[test]
fn http_help_shows_addr() {
    cmd()
        .args(["http", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--addr"));
}

#[cfg(feature = "http")]
#[test]
fn http_rejects_bad_addr() {
    cmd()
        .args(["http", "--addr", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
