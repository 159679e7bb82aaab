//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for file loading, validation, and strict-mode failures.
//! - Keep the structured `ValidationError` reachable for programmatic callers.
//!
//! Invariants:
//! - All error variants include context for debugging (paths, variable names).
//! - No variant carries raw file contents or resolved values.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::{SchemaError, ValidationError};

/// Errors raised while reading env files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read env file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Schema validation failed; inspect the inner error for per-field detail.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Strict mode found pool keys that match no declared field.
    #[error("Unknown environment variables in strict mode: {}", .0.join(", "))]
    UnknownVariables(Vec<String>),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to build {schema} from validated values: {source}")]
    Deserialize {
        schema: String,
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    /// The structured validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            _ => None,
        }
    }
}
