//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway home directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as `$HOME` and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_officehours"))
        .args(args)
        .env("HOME", home)
        .env_remove("OFFICEHOURS_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_config_path() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout
        .trim()
        .ends_with(".config/officehours/config.toml"));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "set", "meeting.minutes", "20"]);
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "meeting.minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");
}

#[test]
fn test_config_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "meeting.minutes", "soon"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "meeting.hours"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["meeting"]["minutes"], 15);
    assert_eq!(parsed["cues"]["enabled"], true);
}

#[test]
fn test_queue_show_empty() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["queue", "show"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "(no students in queue)");

    let (code, stdout, _) = run_cli(home.path(), &["queue", "show", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["names"], serde_json::json!([]));
}

#[test]
fn test_queue_clear() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["queue", "clear"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "queue cleared");
}
