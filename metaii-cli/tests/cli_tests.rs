//! Integration tests for the META II CLI.
//!
//! These tests invoke the `metaii` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn metaii() -> Command {
    Command::cargo_bin("metaii").unwrap()
}

/// Return the workspace root (parent of metaii-cli/).
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Return the absolute path to a test program file.
fn test_program(name: &str) -> PathBuf {
    workspace_root().join("tests/programs").join(name)
}

/// Helper: write a program to a temp file and return its path.
fn write_program(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("prog.asm");
    fs::write(&path, text).unwrap();
    path
}

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    metaii()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: metaii"));
}

#[test]
fn help_flag_exits_0() {
    metaii()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    metaii()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Assemble ----

#[test]
fn assemble_reports_counts() {
    metaii()
        .args(["assemble", test_program("expr.asm").to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("assembled 31 instructions"));
}

#[test]
fn assemble_warns_about_undefined_labels() {
    let dir = TempDir::new().unwrap();
    let prog = write_program(&dir, "\tset\n\tbt NOWHERE\n\tcll ELSEWHERE\n");

    metaii()
        .args(["assemble", prog.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("undefined label 'NOWHERE'"))
        .stderr(predicate::str::contains("undefined label 'ELSEWHERE'"));
}

#[test]
fn assemble_bad_opcode_exits_1() {
    let dir = TempDir::new().unwrap();
    let prog = write_program(&dir, "\tfoobar\n");

    metaii()
        .args(["assemble", prog.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown opcode 'foobar'"));
}

#[test]
fn assemble_missing_file_exits_1() {
    metaii()
        .args(["assemble", "nonexistent.asm"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

// ---- Labels / disassemble ----

#[test]
fn labels_sorted_by_index_then_name() {
    metaii()
        .args(["labels", test_program("expr.asm").to_str().unwrap()])
        .assert()
        .success()
        .stdout(concat!(
            "EX\t0\n", "A2\t2\n", "A3\t8\n", "A1\t11\n", "TERM\t12\n", "B1\t17\n", "B3\t23\n",
            "B2\t30\n", "B4\t30\n",
        ));
}

#[test]
fn disassemble_prints_canonical_text() {
    let dir = TempDir::new().unwrap();
    let prog = write_program(&dir, "  adr  MAIN\nMAIN\n  TST 'a b'\n  BF MAIN\n");

    metaii()
        .args(["disassemble", prog.to_str().unwrap()])
        .assert()
        .success()
        .stdout("\tadr 0\nMAIN\n\ttst 'a b'\n\tbf MAIN\n\tend\n");
}

#[test]
fn disassembly_reassembles() {
    let dir = TempDir::new().unwrap();
    let first = metaii()
        .args(["disassemble", test_program("expr.asm").to_str().unwrap()])
        .output()
        .unwrap();
    let prog = write_program(&dir, &String::from_utf8(first.stdout).unwrap());

    metaii()
        .args(["labels", prog.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("EX\t0\nA2\t2\n"));
}

// ---- Run ----

#[test]
fn run_prints_translation() {
    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            test_program("expr.txt").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("\tload a\n\tload b\n\tlit 1.5\n\tadd\n\tadd\n\tload c\n\tadd\n");
}

#[test]
fn run_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");

    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            test_program("expr.txt").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("");

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("\tload a\n"));
    assert!(text.ends_with("\tload c\n\tadd\n"));
}

#[test]
fn run_syntax_error_exits_2() {
    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            test_program("expr_bad.txt").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("SYNTAX ERROR IN LINE 2"));
}

#[test]
fn run_syntax_error_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");

    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            test_program("expr_bad.txt").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .code(2);

    assert!(!output.exists());
}

#[test]
fn run_undefined_label_exits_3() {
    let dir = TempDir::new().unwrap();
    let prog = write_program(&dir, "\tset\n\tcll MISSING\n");
    let input = dir.path().join("input.txt");
    fs::write(&input, "").unwrap();

    metaii()
        .args(["run", prog.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("runtime error"))
        .stderr(predicate::str::contains("MISSING"));
}

#[test]
fn run_missing_input_exits_1() {
    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            "nonexistent.txt",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_requires_two_files() {
    metaii()
        .args(["run", test_program("expr.asm").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: metaii run"));
}

#[test]
fn run_rejects_stray_arguments() {
    metaii()
        .args([
            "run",
            test_program("expr.asm").to_str().unwrap(),
            test_program("expr.txt").to_str().unwrap(),
            "--verbose",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unexpected arguments"));
}
