//! Statically declared configuration schemas and their validation.
//!
//! Responsibilities:
//! - Describe configuration as a tree of leaf and nested fields.
//! - Flatten nested fields into `PARENT__CHILD` environment names.
//! - Validate raw string values against the tree and aggregate per-field errors.
//! - Read schemas from JSON files for callers without compiled types.
//!
//! Does NOT handle:
//! - Reading env files or exporting variables (see `loader`).
//! - Rendering errors for humans (see `report`).
//!
//! Invariants:
//! - Flattened names are upper-case and unique within a schema.
//! - A leaf is required iff it has no default, no backend reference, and is not optional.

mod file;
mod types;
mod validate;

pub use file::SchemaError;
pub use types::{Entry, Field, FieldKind, FieldType, Leaf, Schema, ValueKind, display_type_name};
pub use validate::{
    FieldError, LeafOrigin, ResolvedLeaf, UnknownFields, Validated, ValidationError, VarSource,
    validate,
};
