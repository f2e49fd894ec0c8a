//! Process-level tests for the flag-filter binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flag-filter"))
        .args(args)
        .output()
        .expect("failed to run flag-filter")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn echoes_positionals_in_order() {
    let output = run(&["one", "two", "three"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["one", "two", "three"]);
}

#[test]
fn exclude_filters_matching_positionals() {
    let output = run(&["--exclude", "two", "one", "two", "three", "--exclude=three"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["one"]);
}

#[test]
fn bit_flags_report_combined_mask() {
    let output = run(&["--read", "--write", "keep"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["keep", "perms: 3"]);
}

#[test]
fn double_dash_passes_flag_shaped_tokens_through() {
    let output = run(&["--", "--read", "-h"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["--read", "-h"]);
}

#[test]
fn unknown_flag_fails_with_message_and_code() {
    let output = run(&["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown option --bogus"),
        "stderr: {stderr}"
    );
}

#[test]
fn missing_exclude_argument_fails_with_code_three() {
    let output = run(&["--exclude"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("option --exclude requires an argument"),
        "stderr: {stderr}"
    );
}

#[test]
fn help_renders_grouped_usage() {
    let output = run(&["-h"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: flag-filter [OPTIONS] [ARGS...]"));
    assert!(stdout.contains("\nBasic options\n"));
    assert!(stdout.contains("\nBit flags\n"));
    assert!(stdout.contains("--exclude <STRING>"));
    assert!(stdout.contains("End of usage"));
}
