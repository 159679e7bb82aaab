//! Shared test utilities for envcraft CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write schema and env fixtures into a temporary project directory.
//!
//! Invariants / Assumptions:
//! - `ENVCRAFT_SCHEMA` and `ENVCRAFT_ENV` never leak in from the host.
//! - Fixture variable names carry an `ECLI_` prefix so host variables cannot collide.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Schema used by most tests: one required string, one defaulted integer,
/// one optional string, one secret, and a nested group.
pub const SCHEMA: &str = r#"{
  "name": "CliConfig",
  "fields": [
    { "name": "ecli_database_url", "type": "string", "description": "PostgreSQL connection URL" },
    { "name": "ecli_port", "type": "integer", "default": 8000 },
    { "name": "ecli_log_file", "type": "string", "optional": true },
    { "name": "ecli_api_key", "type": "secret" },
    { "name": "ecli_cache", "fields": [ { "name": "host", "type": "string", "default": "localhost" } ] }
  ]
}"#;

/// Returns a hermetic `envcraft` command rooted at `dir`.
pub fn envcraft_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envcraft");
    cmd.env_remove("ENVCRAFT_SCHEMA")
        .env_remove("ENVCRAFT_ENV")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir);
    cmd
}

/// Temporary project holding `envcraft.json` and the given files.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("envcraft.json"), SCHEMA).unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}
