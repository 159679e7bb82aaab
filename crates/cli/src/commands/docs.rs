//! Docs command: write Markdown reference documentation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use envcraft_config::constants::DEFAULT_DOCS_FILE;
use envcraft_config::report::write_docs;
use envcraft_config::{LoadOptions, Schema};

pub fn default_path(options: &LoadOptions) -> PathBuf {
    options.dir.join(DEFAULT_DOCS_FILE)
}

pub fn run(schema: &Schema, path: &Path) -> Result<()> {
    write_docs(schema, path).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Generated {}", path.display());
    Ok(())
}
