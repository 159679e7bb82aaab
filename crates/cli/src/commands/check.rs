//! Check command: per-variable presence checklist.
//!
//! Responsibilities:
//! - Load the layered env files into the process environment.
//! - Print the diagnosis and fail when required variables are missing.
//!
//! Does NOT handle:
//! - Type validation (see `validate`).

use anyhow::{Context, Result};
use envcraft_config::report::Diagnosis;
use envcraft_config::{EnvSource, LayeredLoader, LoadOptions, Schema};
use tracing::info;

use crate::error::CliError;

pub fn run(schema: &Schema, options: &LoadOptions) -> Result<()> {
    let pool = LayeredLoader::new(options.base_file.clone())
        .with_dir(&options.dir)
        .with_env(options.env.clone())
        .load()
        .context("Failed to read env files")?;
    pool.export();
    info!(keys = pool.len(), "Loaded env files for check");

    let diagnosis = Diagnosis::run(schema, &EnvSource::process());
    println!("{}", diagnosis);

    if diagnosis.is_valid() {
        Ok(())
    } else {
        let missing = diagnosis.missing().into_iter().map(str::to_string).collect();
        Err(CliError::CheckFailed(missing).into())
    }
}
