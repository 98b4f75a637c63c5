use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn minefield(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_minefield"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch minefield binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is utf8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is utf8")
}

#[test]
fn clearing_run_prints_transcript_and_score() {
    let dir = tempfile::tempdir().expect("temp dir");
    let field = write_fixture(&dir, "field.txt", "..c\n...\nc..\n");
    let script = write_fixture(&dir, "script.txt", "north\nsouth\nalpha\n");

    let output = minefield(&[&field, &script]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = "\
Step 1

..c
...
c..

north

...
...
..b
...
b..

Step 2

...
...
..b
...
b..

south

..a
...
a..

Step 3

..a
...
a..

alpha

.

pass(11)
";
    assert_eq!(stdout(&output), expected);
}

#[test]
fn collision_prints_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let field = write_fixture(&dir, "field.txt", "a\n");
    let script = write_fixture(&dir, "script.txt", "\n");

    let output = minefield(&[&field, &script]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Step 1\n\na\n\n\n\n*\n\nfail (0)\n");
}

#[test]
fn empty_field_passes_without_steps() {
    let dir = tempfile::tempdir().expect("temp dir");
    let field = write_fixture(&dir, "field.txt", ".\n");
    let script = write_fixture(&dir, "script.txt", "gamma\n");

    let output = minefield(&[&field, &script]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "pass(1)\n");
}

#[test]
fn report_flag_writes_json_summary() {
    let dir = tempfile::tempdir().expect("temp dir");
    let field = write_fixture(&dir, "field.txt", "..z\n...\n...\n");
    let script = write_fixture(&dir, "script.txt", "north\nwest\n");
    let report = dir.path().join("report.json");

    let output = Command::new(env!("CARGO_BIN_EXE_minefield"))
        .arg(&field)
        .arg(&script)
        .arg("--report")
        .arg(&report)
        .output()
        .expect("failed to launch minefield binary");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("fail (0)\n"));
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report exists"))
            .expect("report is json");
    assert_eq!(summary["verdict"], "fail");
    assert_eq!(summary["score"], 0);
    assert_eq!(summary["termination"], "mines_remaining");
    assert_eq!(summary["steps_executed"], 2);
    assert_eq!(summary["initial_mines"], 1);
    assert_eq!(summary["moves_made"], 2);
}

#[test]
fn missing_inputs_exit_with_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let script = write_fixture(&dir, "script.txt", "north\n");
    let field = dir.path().join("absent.txt");

    let output = minefield(&[&field, &script]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Input files not found!"));
}

#[test]
fn unreadable_field_is_not_reported_as_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let field = dir.path().join("field.bin");
    fs::write(&field, [0xc3, 0x28, 0x0a]).expect("failed to write fixture");
    let script = write_fixture(&dir, "script.txt", "north\n");

    let output = minefield(&[&field, &script]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Input file could not be read!"));
    assert!(!stderr(&output).contains("Input files not found!"));
}

#[test]
fn malformed_fields_report_their_problem() {
    let cases = [
        ("...\n..\n...\n", "The lines in the field file don't have the same length"),
        ("", "The lines in the field file don't have the same length"),
        ("...\n.!.\n...\n", "The field file contains invalid character!"),
        ("..\n..\n", "The vessel cannot be the center of the input field!"),
    ];
    let dir = tempfile::tempdir().expect("temp dir");
    let script = write_fixture(&dir, "script.txt", "north\n");

    for (index, (contents, message)) in cases.iter().enumerate() {
        let field = write_fixture(&dir, &format!("field{index}.txt"), contents);

        let output = minefield(&[&field, &script]);

        assert_eq!(output.status.code(), Some(1), "case {index}");
        assert!(
            stderr(&output).contains(message),
            "case {index}: {}",
            stderr(&output)
        );
    }
}

#[test]
fn missing_arguments_are_usage_errors() {
    let output = Command::new(env!("CARGO_BIN_EXE_minefield"))
        .output()
        .expect("failed to launch minefield binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}
