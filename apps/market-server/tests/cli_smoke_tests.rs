//! CLI smoke tests for the market-server binary
//!
//! Every test runs against a throwaway home directory so logs and database files never
//! leave the temp dir.

use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Helper to run the market-server binary with given arguments
fn run_market_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_market-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute market-server")
}

/// Write a config rooted at `dir` and return its path.
fn write_config(dir: &Path, database_url: &str) -> String {
    let home = dir.join("home");
    let config_path = dir.join("market.yaml");
    let config_content = format!(
        r#"
home_dir: "{home}"

database:
  url: "{database_url}"
  max_conns: 1

logging:
  default:
    console_level: warn
    file: "logs/market.log"
    file_level: info
    max_backups: 1
    max_size_mb: 1

modules:
  market:
    default_page_size: 20
"#,
        home = home.to_string_lossy().replace('\\', "/"),
    );
    std::fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_market_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("market-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for sub in ["migrate", "check", "categories", "inventory", "receipts"] {
        assert!(stdout.contains(sub), "Should list '{sub}' subcommand");
    }
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_market_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("market-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_market_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report an error: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_market_server(&["--config", "/nonexistent/market.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_market_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("yaml") || stderr.contains("parse"),
        "Should mention YAML parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "sqlite://database/market.db");

    let output = run_market_server(&["--config", &config_path, "check"]);

    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("default_page_size: 20"));
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "sqlite://database/market.db");

    let output = run_market_server(&["--config", &config_path, "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("home_dir:"));
    assert!(stdout.contains("sqlite://database/market.db"));
}

#[test]
fn test_cli_migrate_creates_database_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "sqlite://database/market.db");

    let output = run_market_server(&["--config", &config_path, "migrate"]);

    assert!(
        output.status.success(),
        "Migrate should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir
        .path()
        .join("home")
        .join("database")
        .join("market.db")
        .is_file());

    // Re-running is a no-op.
    let output = run_market_server(&["--config", &config_path, "migrate"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_mock_listings_print_empty_json_arrays() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // The URL is overridden by --mock, so an unreachable server is fine here.
    let config_path = write_config(temp_dir.path(), "postgres://localhost:1/nonexistent");

    for args in [
        vec!["categories"],
        vec!["receipts"],
        vec!["inventory"],
        vec!["inventory", "--name", ""],
    ] {
        let mut full = vec!["--config", config_path.as_str(), "--mock"];
        full.extend(args.iter().copied());
        let output = run_market_server(&full);

        assert!(
            output.status.success(),
            "{args:?} should succeed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let parsed: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(parsed, serde_json::json!([]), "{args:?}");
    }
}

#[test]
fn test_cli_inventory_unknown_category_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "sqlite://database/market.db");

    let output = run_market_server(&[
        "--config",
        &config_path,
        "--mock",
        "inventory",
        "--category",
        "42",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Category not found: 42"),
        "Should report the missing category: {stderr}"
    );
}

#[test]
fn test_cli_inventory_filters_conflict() {
    let output = run_market_server(&["inventory", "--name", "pan", "--category", "1"]);
    assert!(!output.status.success());
}
