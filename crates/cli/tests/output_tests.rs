//! Integration tests for `generate`, `docs`, and `explain`.

mod common;

use std::fs;

use common::{envcraft_cmd, project};
use predicates::prelude::*;

#[test]
fn test_generate_writes_default_example() {
    let dir = project(&[]);

    envcraft_cmd(dir.path())
        .arg("generate")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("✓ Generated"));

    let content = fs::read_to_string(dir.path().join(".env.example")).unwrap();
    assert!(content.starts_with("# Environment Configuration Template\n"));
    assert!(content.contains("# PostgreSQL connection URL\n# Type: String\nECLI_DATABASE_URL=\n"));
    assert!(content.contains("ECLI_PORT=8000\n"));
    assert!(content.contains("# ECLI_CACHE (nested)\n"));
    assert!(content.contains("ECLI_CACHE__HOST=localhost\n"));
}

#[test]
fn test_generate_respects_output_flag() {
    let dir = project(&[]);
    let target = dir.path().join("template.env");

    envcraft_cmd(dir.path())
        .arg("generate")
        .arg("-o")
        .arg(&target)
        .assert()
        .code(0);

    assert!(target.exists());
    assert!(!dir.path().join(".env.example").exists());
}

#[test]
fn test_docs_writes_markdown() {
    let dir = project(&[]);

    envcraft_cmd(dir.path()).arg("docs").assert().code(0);

    let content = fs::read_to_string(dir.path().join("CONFIG.md")).unwrap();
    assert!(content.contains("## ECLI_DATABASE_URL"));
    assert!(content.contains("### ECLI_CACHE__HOST"));
    assert!(content.contains("ECLI_API_KEY=<value>"));
}

#[test]
fn test_explain_known_variable() {
    let dir = project(&[]);

    envcraft_cmd(dir.path())
        .args(["explain", "ecli_port"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("📝 ECLI_PORT"))
        .stdout(predicate::str::contains("Required: No"))
        .stdout(predicate::str::contains("Default: 8000"));
}

#[test]
fn test_explain_unknown_variable_exits_4() {
    let dir = project(&[]);

    envcraft_cmd(dir.path())
        .args(["explain", "ECLI_NOPE"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Variable 'ECLI_NOPE' not found in schema"));
}
