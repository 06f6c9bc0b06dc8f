//! End-to-end tests that run the built `fconvert` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fconvert"))
}

fn run_with_input(args: &[&str], input: &[u8]) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may reject its arguments before reading stdin
    let _ = child.stdin.take().unwrap().write_all(input);
    child.wait_with_output().unwrap()
}

#[test]
fn test_help() {
    let output = cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("base85"));
}

#[test]
fn test_version() {
    let output = cmd().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fconvert"));
}

// ---- Base16 tests ----

#[test]
fn test_base16_encode() {
    let output = run_with_input(&["base16"], b"Hello");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"48656C6C6F\n");

    let output = run_with_input(&["base16", "--lower"], b"\xde\xad");
    assert_eq!(output.stdout, b"dead\n");
}

#[test]
fn test_base16_decode() {
    let output = run_with_input(&["base16", "-d"], b"48656c6C6F\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"Hello");
}

#[test]
fn test_base16_decode_strict_case() {
    let output = run_with_input(&["base16", "-d", "--upper"], b"48656c6C6F");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid character"));
}

#[test]
fn test_base16_decode_odd_length() {
    let output = run_with_input(&["base16", "-d"], b"ABC");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("fconvert: "));
    assert!(stderr.contains("odd length"));
}

// ---- Base64 tests ----

#[test]
fn test_base64_roundtrip_wrapped() {
    let input: Vec<u8> = (0..200u8).collect();
    let encoded = run_with_input(&["base64", "-w"], &input);
    assert!(encoded.status.success());
    let text = String::from_utf8(encoded.stdout.clone()).unwrap();
    assert!(text.lines().all(|l| l.trim_end_matches('\r').len() <= 76));

    let decoded = run_with_input(&["base64", "-d"], &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(decoded.stdout, input);
}

#[test]
fn test_base64_marks() {
    let args = ["base64", "--prefix", "BEGIN:", "--suffix", ":END"];
    let output = run_with_input(&args, b"Hello");
    assert_eq!(output.stdout, b"BEGIN:SGVsbG8=:END\n");

    let args = ["base64", "-d", "--prefix", "BEGIN:", "--suffix", ":END"];
    let output = run_with_input(&args, b"BEGIN:SGVsbG8=:END\n");
    assert_eq!(output.stdout, b"Hello");
}

#[test]
fn test_base64_decode_invalid() {
    let output = run_with_input(&["base64", "-d"], b"SGVs!!bG8=");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid base64"));
}

// ---- Base85 tests ----

#[test]
fn test_base85_encode_marks() {
    let output = run_with_input(&["base85", "--marks"], b"Man ");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"<~9jqo^~>\n");
}

#[test]
fn test_base85_roundtrip_wrapped() {
    let input: Vec<u8> = (0..=255u8).chain([0u8; 8]).collect();
    let encoded = run_with_input(&["base85", "-w", "20", "-m"], &input);
    assert!(encoded.status.success());
    let decoded = run_with_input(&["base85", "-d", "-m"], &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(decoded.stdout, input);
}

#[test]
fn test_base85_negative_wrap() {
    let output = run_with_input(&["base85", "-w", "-1"], b"Man ");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}

#[test]
fn test_base85_missing_marks() {
    let output = run_with_input(&["base85", "-d", "--marks"], b"9jqo^");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("<~"));
}

#[test]
fn test_base85_file_input() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&[0u8; 8]).unwrap();
    let output = cmd()
        .args(["base85", f.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"zz\n");
}

#[test]
fn test_missing_file() {
    let output = cmd()
        .args(["base85", "/nonexistent/fconvert-input"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/fconvert-input: No such file or directory"));
}

// ---- Number tests ----

#[test]
fn test_number_boundaries() {
    let output = cmd()
        .args(["number", "--kind", "i32", "-2147483648"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"-2147483648\n");

    let output = cmd()
        .args(["number", "--kind", "u64", "18446744073709551615"])
        .output()
        .unwrap();
    assert_eq!(output.stdout, b"18446744073709551615\n");
}

#[test]
fn test_number_normalizes() {
    let output = cmd().args(["number", "--kind", "f64", "1.50e1"]).output().unwrap();
    assert_eq!(output.stdout, b"15\n");
    let output = cmd().args(["number", "0042"]).output().unwrap();
    assert_eq!(output.stdout, b"42\n");
}

#[test]
fn test_number_float_scientific() {
    let output = cmd()
        .args(["number", "--kind", "f64", "1000000000000000000000"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"1E+21\n");

    let output = cmd().args(["number", "--kind", "f64", "inf"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid number"));
}

#[test]
fn test_number_out_of_range() {
    let output = cmd()
        .args(["number", "--kind", "i32", "2147483648"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}
