//! Tests for tracing instrumentation
//!
//! --debug installs a subscriber writing to stderr; without it stderr stays quiet.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn get_binary_path() -> String {
    env!("CARGO_BIN_EXE_morsegate").to_string()
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(get_binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait")
}

#[test]
fn test_debug_flag_accepted() {
    let output = run_with_stdin(&["--debug", "--sequence", "."], "0 .\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(
        !stderr.contains("unknown") && !stderr.contains("unexpected"),
        "Debug flag was not accepted: {}",
        stderr
    );
}

#[test]
fn test_debug_output_to_stderr() {
    let output = run_with_stdin(&["--debug", "--sequence", "-."], "0 -\n100 .\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("TRACE") || stderr.contains("DEBUG") || stderr.contains("INFO"),
        "No tracing output found in stderr: {}",
        stderr
    );
}

#[test]
fn test_tracing_shows_match_and_relay_pulse() {
    let output = run_with_stdin(&["--debug", "--sequence", "-."], "0 -\n100 .\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("matched at tick 100"), "stderr: {}", stderr);
    assert!(stderr.contains("Pulsing LED"), "stderr: {}", stderr);
}

#[test]
fn test_tracing_shows_history_dump() {
    let output = run_with_stdin(&["--debug", "--sequence", ".-."], "0 -\n100 .\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("History (length = "), "stderr: {}", stderr);
}

#[test]
fn test_no_tracing_without_debug() {
    let output = run_with_stdin(&["--sequence", "-."], "0 -\n100 .\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.is_empty(), "Unexpected stderr: {}", stderr);
}
