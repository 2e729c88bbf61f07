//! End-to-end CLI tests for the thcc binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn thcc() -> Command {
    Command::cargo_bin("thcc").unwrap()
}

#[test]
fn test_no_arguments_prints_help() {
    thcc()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: thcc"));
}

#[test]
fn test_help_flag() {
    thcc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-o, --output"));
}

#[test]
fn test_unrecognized_argument() {
    thcc()
        .arg("main.c")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized argument 'main.c'"));
}

#[test]
fn test_missing_output_value() {
    thcc()
        .arg("-o")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected argument to '-o'"));
}

#[test]
fn test_missing_input_file() {
    thcc()
        .arg("no_such_file.hc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("couldn't open input file"));
}

#[test]
fn test_compiles_valid_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.hc");
    fs::write(&path, "I64 x = 1 + 2 * 3;\nwhile (x) x -= 1;\n").unwrap();

    thcc().arg(&path).assert().success().stderr("");
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.HC");
    fs::write(&path, ";").unwrap();

    thcc().arg(&path).assert().success();
}

#[test]
fn test_syntax_error_is_positioned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.hc");
    fs::write(&path, "x = ;\n").unwrap();

    thcc()
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(":1:5: expected expression"));
}

#[test]
fn test_lex_error_aborts_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.hc");
    fs::write(&path, "\"unterminated\n").unwrap();

    thcc()
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated string literal"));
}

#[test]
fn test_dump_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.hc");
    fs::write(&path, "x = 1;").unwrap();

    thcc()
        .arg("--dump-tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("type='IDENTIFIER' value='x'"))
        .stdout(predicate::str::contains("type='ASSIGN'"));
}
