//! Layered environment configuration for envcraft.
//!
//! This crate loads `.env`-style files in precedence order, interpolates
//! `${VAR}` references, validates the merged values against a declared
//! field tree, and renders diagnostics, templates, and documentation.
//! Secret values are masked everywhere and may be resolved lazily through
//! pluggable backends.

pub mod backends;
pub mod constants;
pub mod interpolate;
mod loader;
mod manager;
pub mod report;
pub mod schema;
mod secret;

pub use backends::{BackendError, BackendRegistry, SecretBackend};
pub use loader::{
    ConfigError, EnvSource, LayeredLoader, LoadError, SourceMap, VariablePool, env_var_or_none,
    parse_assignments,
};
pub use manager::{ConfigInstance, ConfigManager, LoadOptions, Resolved, Settings, resolve};
pub use schema::{
    Field, FieldError, FieldKind, FieldType, Leaf, Schema, SchemaError, UnknownFields,
    ValidationError, ValueKind, VarSource,
};
pub use secret::{Secret, SecretRef};
