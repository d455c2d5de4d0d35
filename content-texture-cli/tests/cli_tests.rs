//! CLI Tests
//!
//! Runs the built binary against records written to a temporary directory.

use std::fs;
use std::process::Command;

fn dxt1_record() -> Vec<u8> {
    let mut data = Vec::new();
    for value in [0i32, 4, 4, 1, 8] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.extend_from_slice(&[0x00, 0xF8, 0x1F, 0x00, 0x00, 0x55, 0xAA, 0xFF]);
    data
}

#[test]
fn test_decode_resolves_bare_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("wall.xnb"), dxt1_record()).unwrap();
    let output = dir.path().join("out").join("wall.png");

    let status = Command::new(env!("CARGO_BIN_EXE_content-texture"))
        .arg("decode")
        .arg("--input")
        .arg(dir.path().join("wall"))
        .args(["--format-version", "4"])
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(output.exists());
}

#[test]
fn test_info_prints_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wall.xnb");
    fs::write(&input, dxt1_record()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_content-texture"))
        .arg("info")
        .arg("--input")
        .arg(&input)
        .args(["--format-version", "4"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dimensions: 4x4"));
    assert!(stdout.contains("Format:     Dxt1"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_content-texture"))
        .arg("info")
        .arg("--input")
        .arg(dir.path().join("missing"))
        .args(["--format-version", "5"])
        .status()
        .unwrap();
    assert!(!status.success());
}
