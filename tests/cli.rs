//! End-to-end runs of the radiocarbon binary against temporary leak files.

use std::fs;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

const LEAK: &str = "\
peter@web.de:schalke2005
anna.k@web.de:schalke05
sunny+ebay@gmx.de:dragon
kai@mailinator.com:letmein
hans@t-online.de:schalke99
";

fn leak_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn passlist_dir(passwords: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("common.txt"), passwords).unwrap();
    dir
}

fn run(args: &[&str]) -> Output {
    run_with_log_filter(args, None)
}

fn run_with_log_filter(args: &[&str], filter: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_radiocarbon"));
    command.args(args);
    match filter {
        Some(filter) => command.env("RUST_LOG", filter),
        None => command.env_remove("RUST_LOG"),
    };
    command.output().expect("Failed to execute binary")
}

#[test]
fn prints_all_tables() {
    let leak = leak_file(LEAK);
    let passlists = passlist_dir("dragon\n");
    let output = run(&[
        "-f",
        leak.path().to_str().unwrap(),
        "-p",
        passlists.path().to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    for title in [
        "Date Determination",
        "Region Determination",
        "Origin Determination",
        "One-Time Emails",
        "Plus-Character Emails",
    ] {
        assert!(stdout.contains(title), "missing {title}: {stdout}");
    }
    assert!(stdout.contains("kai@mailinator.com"));
    assert!(stdout.contains("ebay"));
}

#[test]
fn json_report_is_cleaned() {
    let leak = leak_file(LEAK);
    let passlists = passlist_dir("dragon\nkai\n");
    let output = run(&[
        "-f",
        leak.path().to_str().unwrap(),
        "-p",
        passlists.path().to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let years: Vec<&str> = report["years"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(years, vec!["2005"]);
    assert_eq!(report["years"][0]["count"], 2);

    let words: Vec<&str> = report["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert!(words.contains(&"schalke2005"));
    assert!(!words.contains(&"dragon"));
    assert!(!words.contains(&"com"));
    assert!(!words.contains(&"online"));
    assert!(!words.contains(&"web"));

    // "kai" is a known password, so its one-time address is dropped
    assert_eq!(report["disposable_mails"].as_array().unwrap().len(), 0);
    assert_eq!(report["plus_mails"][0]["suffix"], "ebay");
}

#[test]
fn multiple_files_accumulate() {
    let first = leak_file("x bob@yopmail.com y\n");
    let second = leak_file("x eve@mailinator.com y\n");
    let passlists = passlist_dir("");
    let output = run(&[
        "-f",
        first.path().to_str().unwrap(),
        "-f",
        second.path().to_str().unwrap(),
        "-p",
        passlists.path().to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["disposable_mails"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_leak_file_fails() {
    let passlists = passlist_dir("dragon\n");
    let output = run(&[
        "-f",
        "/nonexistent/leak.txt",
        "-p",
        passlists.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Leak file not found"));
}

#[test]
fn error_is_reported_with_logging_off() {
    let passlists = passlist_dir("dragon\n");
    let output = run_with_log_filter(
        &[
            "-f",
            "/nonexistent/leak.txt",
            "-p",
            passlists.path().to_str().unwrap(),
            "--json",
        ],
        Some("off"),
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Leak file not found"));
}

#[test]
fn directory_as_leak_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let passlists = passlist_dir("dragon\n");
    let output = run(&[
        "-f",
        dir.path().to_str().unwrap(),
        "-p",
        passlists.path().to_str().unwrap(),
        "--json",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read leak file"));
}

#[test]
fn missing_passlist_dir_fails() {
    let leak = leak_file(LEAK);
    let output = run(&[
        "-f",
        leak.path().to_str().unwrap(),
        "-p",
        "/nonexistent/passlists",
        "--json",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn zero_limit_is_rejected() {
    let leak = leak_file(LEAK);
    let output = run(&["-f", leak.path().to_str().unwrap(), "--top-words", "0"]);
    assert!(!output.status.success());
}
