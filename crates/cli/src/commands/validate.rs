//! Validate command: full load with type checks.
//!
//! Responsibilities:
//! - Run the load pipeline against the schema file.
//! - Print the source report when requested.
//!
//! Does NOT handle:
//! - Formatting validation failures; the pipeline writes those to stderr.

use anyhow::Result;
use envcraft_config::{LoadOptions, Schema, resolve};

pub fn run(schema: &Schema, options: &LoadOptions) -> Result<()> {
    let resolved = resolve(schema, options)?;
    if options.show_sources {
        println!("{}", resolved.source_report());
    }
    println!(
        "✓ Configuration is valid ({} variables checked)",
        resolved.validated.leaves.len()
    );
    Ok(())
}
