//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Build `LoadOptions` from the global flags.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not locate schema files (see `locate` module).

use clap::{Parser, Subcommand};
use envcraft_config::LoadOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envcraft")]
#[command(about = "Environment configuration management tool", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envcraft check\n  envcraft --env production validate --strict\n  envcraft generate -o .env.example\n  envcraft docs -o CONFIG.md\n  envcraft explain DATABASE_URL\n"
)]
pub struct Cli {
    /// Path to the schema file (JSON).
    ///
    /// When omitted, envcraft.json, config/envcraft.json, .envcraft/schema.json,
    /// and schema/envcraft.json are searched under --dir.
    #[arg(long, global = true, env = "ENVCRAFT_SCHEMA", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Directory holding the env files and default schema locations
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Environment tag selecting the `.env.{ENV}` overlay
    #[arg(short, long, global = true, env = "ENVCRAFT_ENV")]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check which variables are present, defaulted, or missing
    Check,

    /// Generate an env template listing every variable
    Generate {
        /// Output file (default: .env.example under --dir)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate Markdown documentation for every variable
    Docs {
        /// Output file (default: CONFIG.md under --dir)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Explain a single variable
    Explain {
        /// Variable name (case-insensitive; nested names use PARENT__CHILD)
        variable: String,
    },

    /// Load and validate the env files
    Validate {
        /// Reject variables that match no declared field
        #[arg(long)]
        strict: bool,

        /// Print which file supplied each value
        #[arg(long)]
        show_sources: bool,
    },
}

impl Cli {
    /// Load options for the global flags; commands adjust the rest.
    pub fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::new()
            .with_dir(&self.dir)
            .auto_generate_example(false)
            .cache(false);
        match self.env.as_deref().map(str::trim) {
            Some(env) if !env.is_empty() => options.with_env(env),
            _ => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "envcraft",
            "validate",
            "--strict",
            "--env",
            "staging",
            "--dir",
            "/srv/app",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate {
                strict: true,
                show_sources: false
            }
        ));
        let options = cli.load_options();
        assert_eq!(options.env.as_deref(), Some("staging"));
        assert_eq!(options.dir, PathBuf::from("/srv/app"));
        assert!(!options.auto_generate_example);
    }

    #[test]
    fn test_blank_env_tag_is_ignored() {
        let cli = Cli::try_parse_from(["envcraft", "--env", "  ", "check"]).unwrap();
        assert!(cli.load_options().env.is_none());
    }

    #[test]
    fn test_explain_requires_variable() {
        assert!(Cli::try_parse_from(["envcraft", "explain"]).is_err());
    }
}
