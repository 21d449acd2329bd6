//! Integration tests for the stackvm CLI.
//!
//! These tests invoke the `stackvm` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn stackvm() -> Command {
    Command::cargo_bin("stackvm").unwrap()
}

/// Helper: assemble `source`, returning the path to the binary output.
fn assemble_to_temp(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let input = dir.path().join(format!("{name}.asm"));
    let output = dir.path().join(format!("{name}.bin"));
    fs::write(&input, source).unwrap();
    stackvm()
        .args(["assemble", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .success();
    output
}

const ADD_AND_PRINT: &str = "PUSH 3.0\nPUSH 4.0\nADD\nOUT\nHALT\n";

// ---- No-args / help ----

#[test]
fn no_args_prints_usage() {
    stackvm()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: stackvm"));
}

#[test]
fn help_flag_exits_0() {
    stackvm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("assemble"))
        .stdout(predicate::str::contains("disassemble"));
}

#[test]
fn unknown_command_fails() {
    stackvm()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

// ---- Assemble ----

#[test]
fn assemble_simple_program() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("add.asm");
    let output = dir.path().join("add.bin");
    fs::write(&input, ADD_AND_PRINT).unwrap();

    stackvm()
        .args(["assemble", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("assembled 5 instructions (25 bytes)"));

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"VM\x01\x00");
    assert_eq!(bytes.len(), 4 + 9 + 9 + 1 + 1 + 1);
}

#[test]
fn assemble_missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    stackvm()
        .args([
            "assemble",
            "/nonexistent/file.asm",
            dir.path().join("out.bin").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn assemble_error_reports_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.asm");
    let output = dir.path().join("bad.bin");
    fs::write(&input, "PUSH 1\nJMP nowhere\nHALT\n").unwrap();

    stackvm()
        .args(["assemble", input.to_str().unwrap(), output.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2: label 'nowhere' not found"));
    assert!(!output.exists());
}

#[test]
fn assemble_requires_output() {
    stackvm()
        .args(["assemble", "in.asm"])
        .assert()
        .failure()
        .code(2);
}

// ---- Run ----

#[test]
fn run_prints_output_and_time() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "add", ADD_AND_PRINT);

    stackvm()
        .args(["run", binary.to_str().unwrap()])
        .assert()
        .success()
        .stdout("7.0000000000\n")
        .stderr(predicate::str::contains("Execution time:"));
}

#[test]
fn run_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "double", "IN\nDUP\nADD\nOUT\nHALT\n");

    stackvm()
        .args(["run", binary.to_str().unwrap()])
        .write_stdin("21\n")
        .assert()
        .success()
        .stdout("42.0000000000\n");
}

#[test]
fn run_precision_flag() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "third", "PUSH 1\nPUSH 3\nDIV\nOUT\nHALT\n");

    stackvm()
        .args(["run", "--precision", "3", binary.to_str().unwrap()])
        .assert()
        .success()
        .stdout("0.333\n");
}

#[test]
fn run_trace_flag() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "halt", "PUSH 1\nHALT\n");

    stackvm()
        .args(["run", "--trace", binary.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("00000000: PUSH 1.0"))
        .stdout(predicate::str::contains("00000009: HALT"));
}

#[test]
fn run_several_binaries_in_order() {
    let dir = TempDir::new().unwrap();
    let first = assemble_to_temp(&dir, "one", "PUSH 1\nOUT\nHALT\n");
    let second = assemble_to_temp(&dir, "two", "PUSH 2\nOUT\nHALT\n");

    stackvm()
        .args([
            "run",
            "--precision",
            "0",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn run_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let bad = assemble_to_temp(&dir, "bad", "PUSH 1\nPUSH 0\nDIV\nHALT\n");
    let good = assemble_to_temp(&dir, "good", "PUSH 5\nOUT\nHALT\n");

    stackvm()
        .args(["run", bad.to_str().unwrap(), good.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::contains("Error: division by zero"))
        .stdout(predicate::str::contains("MACHINE DUMP STATE"))
        .stdout(predicate::str::contains("5.0000000000").not())
        .stderr(predicate::str::contains("runtime error"))
        .stderr(predicate::str::contains("Execution time").not());
}

#[test]
fn run_missing_halt_exits_3() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "nohalt", "PUSH 1\n");

    stackvm()
        .args(["run", binary.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("crossed the program limits"));
}

#[test]
fn run_rejects_foreign_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foreign.bin");
    fs::write(&path, b"ELF\x01\x00").unwrap();

    stackvm()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("signature"));
}

#[test]
fn run_rejects_other_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.bin");
    fs::write(&path, b"VM\x02\x00\x00").unwrap();

    stackvm()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("program 2.0, processor 1.0"));
}

#[test]
fn run_requires_a_binary() {
    stackvm().arg("run").assert().failure().code(2);
}

// ---- Disassemble ----

#[test]
fn disassemble_prints_text() {
    let dir = TempDir::new().unwrap();
    let binary = assemble_to_temp(&dir, "add", ADD_AND_PRINT);

    stackvm()
        .args(["disassemble", binary.to_str().unwrap()])
        .assert()
        .success()
        .stdout("PUSH 3.0\nPUSH 4.0\nADD\nOUT\nHALT\n");
}

#[test]
fn disassemble_then_assemble_roundtrip() {
    let dir = TempDir::new().unwrap();
    let source = "start: IN\nDUP\nPUSH 0\nJE done\nOUT\nJMP start\ndone: HALT\n";
    let first = assemble_to_temp(&dir, "loop", source);

    let output = stackvm()
        .args(["disassemble", first.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();

    let second = assemble_to_temp(&dir, "loop2", &text);
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn disassemble_truncated_body_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.bin");
    fs::write(&path, b"VM\x01\x00\x01\x00\x00").unwrap();

    stackvm()
        .args(["disassemble", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PUSH"));
}
