//! Command dispatch logic.
//!
//! Responsibilities:
//! - Locate and parse the schema for every command.
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - Schema lookup failures surface as `CliError::SchemaNotFound`.

use anyhow::{Context, Result};
use envcraft_config::Schema;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::locate::locate_schema;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let schema_path = locate_schema(cli.schema.as_deref(), &cli.dir)?;
    let schema = Schema::from_file(&schema_path)
        .with_context(|| format!("Failed to load schema from {}", schema_path.display()))?;
    let options = cli.load_options();

    match cli.command {
        Commands::Check => commands::check::run(&schema, &options),
        Commands::Generate { output } => {
            let path = output.unwrap_or_else(|| options.example_path());
            commands::generate::run(&schema, &path)
        }
        Commands::Docs { output } => {
            let path = output.unwrap_or_else(|| commands::docs::default_path(&options));
            commands::docs::run(&schema, &path)
        }
        Commands::Explain { variable } => commands::explain::run(&schema, &variable),
        Commands::Validate {
            strict,
            show_sources,
        } => commands::validate::run(
            &schema,
            &options.strict(strict).show_sources(show_sources),
        ),
    }
}
