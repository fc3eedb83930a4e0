//! CLI integration tests
//!
//! These tests run the compiled binary and check:
//! - Help and version output
//! - Generated document on stdout and on disk
//! - Detection report formats
//! - Exit codes on failure

mod support;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use support::{create_tree, read_golden};

fn dependabot_gen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dependabot-gen"))
}

/// Runs the binary with a clean DEPGEN_* environment
fn run(args: &[&str]) -> Output {
    let mut command = Command::new(dependabot_gen_bin());
    for var in [
        "DEPGEN_SCAN_PATH",
        "DEPGEN_INTERVAL",
        "DEPGEN_OUTPUT",
        "DEPGEN_IGNORE_DIRS",
        "DEPGEN_CUSTOM_MAP",
        "DEPGEN_LOG_LEVEL",
        "DEPGEN_LOG_JSON",
        "RUST_LOG",
    ] {
        command.env_remove(var);
    }
    command.args(args).output().expect("Failed to execute dependabot-gen")
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("detect"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_stdout_matches_golden() {
    let repo = create_tree(&[
        ("go.mod", "module example.com/app\n"),
        ("Dockerfile", "FROM scratch\n"),
    ]);
    let path = repo.path().to_str().unwrap();

    let output = run(&["generate", path, "--interval", "daily", "--stdout"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        read_golden("single_project.golden.yml")
    );
}

#[test]
fn test_generate_writes_default_output_under_cwd() {
    let repo = create_tree(&[("Cargo.toml", "[package]\n")]);

    let output = Command::new(dependabot_gen_bin())
        .args(["generate", "--quiet"])
        .current_dir(repo.path())
        .env_remove("DEPGEN_OUTPUT")
        .env_remove("DEPGEN_SCAN_PATH")
        .env_remove("DEPGEN_CUSTOM_MAP")
        .env_remove("DEPGEN_IGNORE_DIRS")
        .env_remove("DEPGEN_INTERVAL")
        .output()
        .expect("Failed to execute dependabot-gen");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(repo.path().join(".github/dependabot.yml")).unwrap();
    assert!(written.contains("package-ecosystem: \"cargo\""));
    assert!(written.contains("interval: \"weekly\""));
}

#[test]
fn test_detect_json_report() {
    let repo = create_tree(&[
        ("go.mod", "module example.com/app\n"),
        ("project-a/uv.lock", "version = 1\n"),
        ("project-a/pyproject.toml", "[project]\n"),
        (".venv/pkg/package.json", "{}\n"),
    ]);
    let path = repo.path().to_str().unwrap();

    let output = run(&["detect", path, "--ignore-dirs", ".venv", "--format", "json"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!({"gomod": ["/"], "uv": ["project-a"]})
    );
}

#[test]
fn test_detect_with_custom_map_file() {
    let repo = create_tree(&[
        ("modules/app.lockfile", "\n"),
        ("rules.json", r#"[{"ecosystem": "internal", "patterns": ["*.lockfile"]}]"#),
    ]);
    let path = repo.path().to_str().unwrap();
    let rules = repo.path().join("rules.json");

    let output = run(&[
        "detect",
        path,
        "--custom-map-file",
        rules.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["internal"], serde_json::json!(["modules"]));
}

#[test]
fn test_missing_root_fails() {
    let repo = create_tree(&[]);
    let missing = repo.path().join("missing");

    let output = run(&["generate", missing.to_str().unwrap(), "--stdout"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_malformed_custom_map_fails() {
    let repo = create_tree(&[("go.mod", "module x\n")]);
    let path = repo.path().to_str().unwrap();

    let output = run(&["generate", path, "--custom-map", "[{\"ecosystem\":", "--stdout"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_interval_fails() {
    let repo = create_tree(&[("go.mod", "module x\n")]);
    let path = repo.path().to_str().unwrap();

    let output = run(&["generate", path, "--interval", "hourly", "--stdout"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_log_level_flag_fails() {
    let repo = create_tree(&[("go.mod", "module x\n")]);
    let path = repo.path().to_str().unwrap();

    let output = run(&["--log-level", "bogus", "generate", path, "--stdout"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_stdout_conflicts_with_output() {
    let output = run(&["generate", "--stdout", "--output", "out.yml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"));
}
