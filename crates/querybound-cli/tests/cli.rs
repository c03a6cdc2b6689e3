use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("querybound").unwrap()
}

/// Writes the three streams into a temp dir and returns their paths.
fn streams(dir: &TempDir, input: &str, output: &str, answer: &str) -> [PathBuf; 3] {
    let write = |name: &str, contents: &str| {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    };
    [
        write("input.txt", input),
        write("output.txt", output),
        write("answer.txt", answer),
    ]
}

fn judge(dir: &TempDir, input: &str, output: &str, answer: &str) -> Command {
    let [input, output, answer] = streams(dir, input, output, answer);
    let mut cmd = cmd();
    cmd.arg(input).arg(output).arg(answer);
    cmd
}

#[test]
fn accepts_within_budget() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "18\n", "20\n")
        .assert()
        .code(0)
        .stderr(contains("OK n = 1, guessed in 18 queries, range [1, 1000]"));
}

#[test]
fn contestant_over_budget() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "26\n", "10\n")
        .assert()
        .code(1)
        .stderr(contains("WRONG_ANSWER contestant used 26 queries, limit is 25"));
}

#[test]
fn reference_over_budget() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "5\n", "30\n")
        .assert()
        .code(3)
        .stderr(contains("FAIL reference solution used 30 queries, limit is 25"));
}

#[test]
fn both_at_limit() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "25\n", "25\n").assert().code(0);
}

#[test]
fn malformed_reference() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "18\n", "oops\n").assert().code(3);
}

#[test]
fn malformed_contestant_with_reference_over_budget() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "garbage\n", "30\n")
        .assert()
        .code(1)
        .stderr(contains("contestant stream (contestant output)"));
}

#[test]
fn malformed_contestant() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "eighteen\n", "20\n")
        .assert()
        .code(1)
        .stderr(contains("found `eighteen`"));
}

#[test]
fn max_queries_flag_overrides_default() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "12\n", "8\n")
        .args(["--max-queries", "10"])
        .assert()
        .code(1)
        .stderr(contains("limit is 10"));
}

#[test]
fn problem_file_configures_limit_and_message() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("problem.yaml");
    fs::write(
        &config,
        r#"
name: "binary-search"
max_queries: 10
input_fields:
  - name: size
    min: 1
accept_message: "{queries}/{limit} queries on {size} elements"
"#,
    )
    .unwrap();

    judge(&dir, "64\n", "6\n", "6\n")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stderr(contains("OK 6/10 queries on 64 elements"));
}

#[test]
fn invalid_problem_file_is_fail() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("problem.json");
    fs::write(&config, r#"{"name": "x", "max_queries": "lots"}"#).unwrap();

    judge(&dir, "1 1000\n", "18\n", "20\n")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(contains("FAIL"));
}

#[test]
fn missing_stream_file_is_fail() {
    let dir = TempDir::new().unwrap();
    let [input, output, _] = streams(&dir, "1 1000\n", "18\n", "20\n");
    cmd()
        .arg(input)
        .arg(output)
        .arg(dir.path().join("does-not-exist.txt"))
        .assert()
        .code(3)
        .stderr(contains("does-not-exist.txt"));
}

#[test]
fn missing_arguments_are_fail_not_presentation_error() {
    cmd().arg("only-one.txt").assert().code(3);
}

#[test]
fn help_exits_cleanly() {
    cmd().arg("--help").assert().success().stdout(contains("Exit status"));
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn writes_text_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.txt");
    judge(&dir, "1 1000\n", "26\n", "10\n")
        .arg(&report)
        .assert()
        .code(1);

    assert_eq!(
        read(&report),
        "WRONG_ANSWER contestant used 26 queries, limit is 25\n"
    );
}

#[test]
fn unwritable_report_is_a_single_fail_line() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("missing-dir").join("report.txt");
    let output = judge(&dir, "1 1000\n", "18\n", "20\n")
        .arg(&report)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let verdicts: Vec<&str> = stderr
        .lines()
        .filter(|line| ["OK ", "WRONG_ANSWER ", "FAIL "].iter().any(|code| line.starts_with(code)))
        .collect();
    assert_eq!(verdicts.len(), 1, "stderr: {stderr}");
    assert!(verdicts[0].starts_with("FAIL failed to write report"));
}

#[test]
fn negative_count_is_within_budget() {
    let dir = TempDir::new().unwrap();
    judge(&dir, "1 1000\n", "-3\n", "20\n").assert().code(0);
}

#[test]
fn writes_json_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");
    judge(&dir, "1 1000\n", "18\n", "20\n")
        .arg(&report)
        .args(["--report-format", "json"])
        .assert()
        .code(0);

    let json: serde_json::Value = serde_json::from_str(&read(&report)).unwrap();
    assert_eq!(json["code"], "OK");
    assert_eq!(json["party"], "contestant");
    assert_eq!(json["limit"], 25);
    assert_eq!(json["reference_queries"], 20);
    assert_eq!(json["contestant_queries"], 18);
    assert_eq!(json["parameters"]["m"], 1000);
}
