//! Generate command: write the env template.

use std::path::Path;

use anyhow::{Context, Result};
use envcraft_config::Schema;
use envcraft_config::report::write_example;

pub fn run(schema: &Schema, path: &Path) -> Result<()> {
    write_example(schema, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Generated {}", path.display());
    Ok(())
}
