mod fixtures;

use std::fs;
use std::process::{Command, Output};

use fixtures::{go_fixture, go_fixtures_path};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn tesls(args: &[&str]) -> Output {
    tesls_for("linux", args)
}

fn tesls_for(goos: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tesls"))
        .args(["--goos", goos, "--goarch", "amd64"])
        .args(args)
        .current_dir(go_fixtures_path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tesls")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_cli_no_packages_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_tesls"))
        .output()
        .expect("Failed to execute tesls");

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Usage: tesls"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tesls"))
        .arg("--help")
        .output()
        .expect("Failed to execute tesls");

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--format"));
    assert!(text.contains("--tabs"));
    assert!(text.contains("--placeholders"));
}

#[test]
fn test_cli_default_template() {
    let output = tesls(&["./sample"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let dir = go_fixture("sample");
    let expected = format!(
        "sample.TestAdd {0}\nsample.TestSub {0}\nsample_test.TestExternal {1}\n",
        dir.join("sample_test.go").display(),
        dir.join("external_test.go").display()
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_cli_recursive() {
    let output = tesls(&["-f", "%P.%T", "./sample/..."]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "nested.TestNested\nsample.TestAdd\nsample.TestSub\nsample_test.TestExternal\n"
    );
}

#[test]
fn test_cli_json() {
    let output = tesls(&["--format", "json", "./sample/nested"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let file = go_fixture("sample/nested/nested_test.go");
    let expected = format!(
        "[{{\"name\":\"TestNested\",\"file\":{},\"pkg\":\"nested\"}}]\n",
        serde_json::to_string(&file.to_string_lossy()).unwrap()
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_cli_tabs() {
    let output = tesls(&["--tabs", "./sample"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    // Widest first cell is "sample_test.TestExternal" (24 chars) plus padding 5.
    for line in &lines {
        let file_column = line.find('/').unwrap();
        assert_eq!(file_column, 29, "{line}");
    }
    assert!(lines[0].starts_with("sample.TestAdd               /"));
}

#[test]
fn test_cli_braces_placeholders() {
    let output = tesls(&["--placeholders", "braces", "-f", "{{.Name}}", "./sample"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "TestAdd\nTestSub\nTestExternal\n");
}

#[test]
fn test_cli_build_tags() {
    let output = tesls(&["-f", "%T", "./constraints"]);
    assert_eq!(stdout(&output), "TestPlain\n");

    let output = tesls_for(
        "windows",
        &["-f", "%T", "--tags", "integration", "./constraints"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "TestIntegration\nTestPlain\nTestWindowsOnly\n"
    );
}

#[test]
fn test_cli_no_tests_found() {
    let output = tesls(&["./nogo"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "no tests were found\n");
}

#[test]
fn test_cli_missing_directory() {
    let output = tesls(&["./does-not-exist"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("directory not found"));
}

#[test]
fn test_cli_scan_error_prints_nothing() {
    let output = tesls(&["./sample", "./broken"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("broken_test.go:"));
}

#[test]
fn test_cli_multiple_packages() {
    let output = tesls(&["./mixed"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("found packages a (a.go) and b (b.go)"));
}

#[test]
fn test_cli_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tesls.yaml");
    fs::write(&config_path, "format: \"%P/%T\"\nparallel: true\n").unwrap();

    let output = tesls(&["--config", config_path.to_str().unwrap(), "./sample/nested"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "nested/TestNested\n");
}

#[test]
fn test_cli_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tesls.yaml");
    fs::write(&config_path, "unknown_key: 1\n").unwrap();

    let output = tesls(&["--config", config_path.to_str().unwrap(), "./sample"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Invalid config file"));
}
