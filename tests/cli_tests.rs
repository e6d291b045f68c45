//! Integration tests driving the CLI binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_shamir-recover");

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run binary")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn json_lines(output: &str) -> Vec<serde_json::Value> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{') && line.ends_with('}'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_recover_both_reference_cases() {
    let output = run(&["recover", "--json", &fixture("case1.json"), &fixture("case2.json")]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let results = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["secret"], "3");
    assert_eq!(results[1]["secret"], "79836264049851");
    assert_eq!(results[1]["ignored"], serde_json::json!([8, 9, 10]));
}

#[test]
fn test_recover_human_output() {
    let output = run(&["recover", &fixture("case1.json")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Config: 3-of-4"));
    assert!(stdout.contains("Secret: 3"));
}

#[test]
fn test_recover_reports_failures_and_continues() {
    let output = run_with_stdin(
        &["recover", "--json", "-", &fixture("case1.json")],
        r#"{"keys": {"n": 5, "k": 4}, "1": {"base": "10", "value": "4"}}"#,
    );
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not enough points"), "{}", stderr);
    assert!(stderr.contains("1 of 2 documents failed"), "{}", stderr);

    let results = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["secret"], "3");
}

#[test]
fn test_recover_missing_file() {
    let output = run(&["recover", "/definitely/not/here.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_lenient_flag() {
    let output = run_with_stdin(
        &["recover", "--json", "--lenient", "-"],
        r#"{"keys": {"n": 3, "k": 2}, "1": {"base": "10", "value": "1"}, "3": {"base": "10", "value": "2"}}"#,
    );
    assert!(output.status.success());
    let results = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(results[0]["secret"], "0");
    assert_eq!(results[0]["mode"], "truncating");
}

#[test]
fn test_split_pipes_into_recover() {
    let split = run(&[
        "split",
        "--secret",
        "31415926535897932384626433832795",
        "-n",
        "8",
        "-k",
        "5",
        "--seed",
        "3",
        "--omit",
        "2,3",
    ]);
    assert!(split.status.success(), "{}", String::from_utf8_lossy(&split.stderr));
    let document = String::from_utf8_lossy(&split.stdout).to_string();

    let output = run_with_stdin(&["recover", "--json", "-"], &document);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let results = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(results[0]["secret"], "31415926535897932384626433832795");
    assert_eq!(results[0]["used"], serde_json::json!([1, 4, 5, 6, 7]));
}

#[test]
fn test_split_rejects_bad_threshold() {
    let output = run(&["split", "--secret", "5", "-n", "2", "-k", "3"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid threshold"));
}
