//! Layered `.env` file loading.
//!
//! Responsibilities:
//! - Build the candidate file list (`base`, `base.{env}`, `base.local`).
//! - Parse `KEY=VALUE` lines and interpolate references in two passes per file.
//! - Merge files into a `VariablePool` with per-key source attribution.
//! - Export resolved values into the process environment.
//!
//! Does NOT handle:
//! - Validating values against a schema (see `schema`).
//! - Caching loaded configurations (see `manager`).
//!
//! Invariants / Assumptions:
//! - Later files overwrite earlier ones, value and source together.
//! - Missing candidate files are skipped silently; unreadable ones are errors.
//! - Pool keys are lower-case; exported environment names are upper-case.

mod env;
mod error;
mod layered;
mod parse;

pub use env::{EnvSource, env_var_or_none};
pub use error::{ConfigError, LoadError};
pub use layered::{LayeredLoader, SourceMap, VariablePool};
pub use parse::parse_assignments;
