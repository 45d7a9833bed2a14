//! Runs the pcx2sms binary against files in a temp dir.

#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn pcx2sms(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pcx2sms"))
        .args(args)
        .output()
        .expect("Failed to run pcx2sms")
}

/// 8x8 PCX whose every pixel is `value`.
fn solid_pcx(value: u8) -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data[0] = 0x0A;
    data[8] = 7; // xmax
    data[10] = 7; // ymax
    for _ in 0..8 {
        data.extend_from_slice(&[0xC8, value]);
    }
    data
}

#[test]
fn converts_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("solid.pcx");
    let output = dir.path().join("solid.raw");
    std::fs::write(&input, solid_pcx(0x0F)).unwrap();

    let out = pcx2sms(&[input.as_path(), output.as_path()]);
    assert!(
        out.status.success(),
        "pcx2sms failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("8x8"), "dimensions not reported: {stderr}");

    let tiles = std::fs::read(&output).expect("Failed to read output");
    assert_eq!(tiles, vec![0xFF; 32]);
}

#[test]
fn missing_arguments_fail() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("only.pcx");

    let out = pcx2sms(&[]);
    assert!(!out.status.success());

    let out = pcx2sms(&[input.as_path()]);
    assert!(!out.status.success());
    assert!(!input.exists());
}

#[test]
fn missing_input_fails_before_creating_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("absent.pcx");
    let output = dir.path().join("absent.raw");

    let out = pcx2sms(&[input.as_path(), output.as_path()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to open input"));
    assert!(!output.exists());
}

#[test]
fn corrupt_input_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("short.pcx");
    let output = dir.path().join("short.raw");
    let mut data = solid_pcx(0x01);
    data.truncate(130);
    std::fs::write(&input, data).unwrap();

    let out = pcx2sms(&[input.as_path(), output.as_path()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unexpected end of input"), "{stderr}");
}
