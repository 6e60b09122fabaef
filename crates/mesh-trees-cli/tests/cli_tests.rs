//! CLI smoke tests. All of these stay offline: the one test that points
//! the binary at a service URL uses an unroutable localhost port, which
//! exercises the row-level failure path.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("mesh-enrich").unwrap()
}

fn write_input(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("input.tsv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "CTD-ASSIGNED CONCEPT ID\tCTD-ASSIGNED CONCEPT NAME").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

#[test]
fn test_help_lists_options() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--delay"))
        .stdout(predicate::str::contains("--log-level"))
        .stdout(predicate::str::contains("--branch-fallback"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_input_file_fails() {
    cli()
        .arg("/nonexistent/ctd-mesh-ids.tsv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_missing_id_column_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.tsv");
    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "WRONG COLUMN\tANOTHER COLUMN").unwrap();
    writeln!(file, "a\tb").unwrap();
    drop(file);

    cli()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CTD-ASSIGNED CONCEPT ID"));
}

#[test]
fn test_non_finite_delay_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &["MESH:D003924\tDiabetes Mellitus, Type 2"]);

    cli()
        .arg(&input)
        .args(["--delay", "inf", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --delay"));
}

#[test]
fn test_unreachable_service_still_completes() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &["MESH:D003924\tDiabetes Mellitus, Type 2"]);
    let output = dir.path().join("out.tsv");

    // Row-level fetch failures never fail the run; the row comes through
    // with the added columns empty.
    cli()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-d", "0", "--timeout", "1", "--no-progress"])
        .args(["--base-url", "http://127.0.0.1:9/mesh"])
        .args(["--sparql-url", "http://127.0.0.1:9/sparql"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("MESH_TREE_TOP_LABELS"));

    let row: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(row.len(), 7);
    assert_eq!(row[0], "MESH:D003924");
    assert_eq!(row[1], "Diabetes Mellitus, Type 2");
    for cell in &row[2..] {
        assert!(cell.is_empty());
    }
}
