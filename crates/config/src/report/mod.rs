//! Human-readable reports derived from a schema.
//!
//! Responsibilities:
//! - Format validation failures with kind-specific hints and fuzzy suggestions.
//! - Diagnose which fields are present, defaulted, or missing.
//! - Render `.env.example` templates and Markdown documentation.
//! - Report which file supplied each value and explain single fields.
//!
//! Does NOT handle:
//! - Loading or validating values (see `loader` and `schema`).
//! - Deciding where output goes; renderers return `String`s.
//!
//! Invariants:
//! - Secret values never appear in any rendered text.
//! - Every walk visits fields in declaration order, groups before children.

mod diagnose;
mod docs;
mod errors;
mod example;
mod explain;
mod sources;
mod suggest;

pub use diagnose::{Diagnosis, DiagnosisEntry, DiagnosisStatus};
pub use docs::{render_docs, write_docs};
pub use errors::{field_hints, format_unknown_variables, format_validation_error};
pub use example::{render_example, write_example};
pub use explain::{Explanation, explain};
pub use sources::{SourceReport, SourceRow};
pub use suggest::{close_matches, similarity};

use crate::constants::SECRET_MASK;
use crate::schema::Leaf;

/// Default text safe to print for `leaf`.
pub(crate) fn shown_default(leaf: &Leaf) -> Option<String> {
    leaf.default.as_ref().map(|default| {
        if leaf.is_secret() {
            SECRET_MASK.to_string()
        } else {
            default.clone()
        }
    })
}
