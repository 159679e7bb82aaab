//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Define CLI-only error conditions and map library errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-4 are reserved for specific error categories.

use std::path::PathBuf;

use envcraft_config::ConfigError;
use thiserror::Error;

/// Structured exit codes for envcraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unreadable files, bad schema, write failures.
    GeneralError = 1,

    /// Validation failed - missing, malformed, or unknown variables.
    ///
    /// Scripts should fix the env files and not retry unchanged.
    ValidationFailed = 2,

    /// No schema file was given or found at any default location.
    SchemaNotFound = 3,

    /// `explain` was asked about a variable the schema does not declare.
    VariableNotFound = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Failures that only exist at the command-line surface.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not find a schema file. Searched: {}", format_paths(.searched))]
    SchemaNotFound { searched: Vec<PathBuf> },

    #[error("Variable '{0}' not found in schema")]
    VariableNotFound(String),

    #[error("Required variables are missing: {}", .0.join(", "))]
    CheckFailed(Vec<String>),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::SchemaNotFound { .. } => ExitCode::SchemaNotFound,
            CliError::VariableNotFound(_) => ExitCode::VariableNotFound,
            CliError::CheckFailed(_) => ExitCode::ValidationFailed,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::ValidationFailed(_) | ConfigError::UnknownVariables(_) => {
                ExitCode::ValidationFailed
            }
            _ => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }
        ExitCode::GeneralError
    }
}
