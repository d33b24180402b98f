// Tastier - A single-pass compiler for a stack-based virtual machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! End-to-end CLI integration tests.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tastier"))
}

const HELLO: &str = "program Hello { void Main() { write \"hello\"; } }";

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tastier") || stdout.contains("Tastier"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("--watch"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tastier"));
    assert!(stdout.contains("0.1.0"));
}

/// Without -o the listing lands next to the source with an .asm extension.
#[test]
fn test_compile_to_default_path() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Hello.TAS");
    fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compiled"));

    let listing = fs::read_to_string(dir.path().join("Hello.asm")).unwrap();
    assert!(listing.starts_with(".names 1\n.proc Main\nCall 0 Main\n"));
    assert!(listing.contains("WriteS 5\n"));
    assert!(listing.ends_with("Leave\nRet\n"));
}

/// Test compiling with an explicit output path.
#[test]
fn test_compile_with_output_flag() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Hello.TAS");
    let output_path = dir.path().join("out.lst");
    fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output_path.exists());
    assert!(!dir.path().join("Hello.asm").exists());
}

/// Test verbose output.
#[test]
fn test_verbose_output() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Hello.TAS");
    fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-v")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tastier Compiler v0.1.0"));
    assert!(stdout.contains("Generated 2 directory entries"));
}

/// Errors are reported with their code and the build fails with exit code 1.
#[test]
fn test_compile_errors_exit_code() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Broken.TAS");
    fs::write(&source_path, "program P { void Main() { y := 1; } }").unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E200"));
    assert!(stderr.contains("reference to undefined variable y"));
    assert!(stderr.contains("1 errors detected"));
    assert!(!dir.path().join("Broken.asm").exists());
}

/// Warnings are printed but do not fail the build.
#[test]
fn test_warnings_do_not_fail() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Empty.TAS");
    fs::write(&source_path, "program Empty { }").unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Program Empty is empty"));
    assert!(dir.path().join("Empty.asm").exists());
}

/// A missing source file exits with code 3.
#[test]
fn test_missing_source_file() {
    let dir = TempDir::new().unwrap();

    let output = cargo_bin()
        .arg(dir.path().join("Missing.TAS"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot read"));
}

/// An unwritable output path exits with code 4.
#[test]
fn test_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("Hello.TAS");
    fs::write(&source_path, HELLO).unwrap();

    let output = cargo_bin()
        .arg(&source_path)
        .arg("-o")
        .arg(dir.path().join("no/such/dir/out.asm"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(4));
}

/// A missing source argument is a usage error.
#[test]
fn test_missing_argument() {
    let output = cargo_bin().output().expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}
