//! Validation failure formatting.

use super::suggest::close_matches;
use crate::constants::{MAX_SUGGESTIONS, SUGGESTION_CUTOFF};
use crate::schema::{FieldError, Schema, ValidationError};

/// Hint lines for one field error, without indentation.
///
/// Suggestions never repeat the field's own name, so a missing field that is
/// declared in the schema only gets suggestions for its near neighbours.
pub fn field_hints(error: &FieldError, valid_names: &[String]) -> Vec<String> {
    let name = error.field.to_uppercase();
    let mut hints = Vec::new();
    let suggest = |hints: &mut Vec<String>| {
        let found = close_matches(
            &name,
            valid_names.iter().map(String::as_str),
            MAX_SUGGESTIONS,
            SUGGESTION_CUTOFF,
        );
        if !found.is_empty() {
            hints.push(format!("💡 Did you mean: {}?", found.join(", ")));
        }
    };

    if error.kind == "missing" {
        hints.push(format!("→ Set {} in your .env file or environment", name));
        suggest(&mut hints);
    } else if error.kind.contains("int") {
        hints.push(format!("→ {} must be a valid integer", name));
    } else if error.kind.contains("bool") {
        hints.push(format!("→ {} must be true/false or 1/0", name));
    } else if error.kind.contains("float") {
        hints.push(format!("→ {} must be a valid number", name));
    } else if error.kind.contains("extra") {
        hints.push(format!("→ {} is not a valid configuration variable", name));
        suggest(&mut hints);
    }
    hints
}

/// Render every field error of `err` with hints drawn from `schema`.
pub fn format_validation_error(err: &ValidationError, schema: &Schema) -> String {
    render(&err.errors, schema)
}

/// Render strict-mode rejections the same way as `extra_forbidden` errors.
pub fn format_unknown_variables(names: &[String], schema: &Schema) -> String {
    let errors: Vec<FieldError> = names
        .iter()
        .map(|name| FieldError {
            field: name.to_lowercase(),
            kind: "extra_forbidden".to_string(),
            message: "Extra inputs are not permitted".to_string(),
        })
        .collect();
    render(&errors, schema)
}

fn render(errors: &[FieldError], schema: &Schema) -> String {
    let valid_names = schema.leaf_names();
    let mut output = String::from("\n❌ Environment Configuration Error:\n\n");
    for error in errors {
        output.push_str(&format!("  • {}: {}\n", error.field, error.message));
        for hint in field_hints(error, &valid_names) {
            output.push_str(&format!("    {}\n", hint));
        }
        output.push('\n');
    }
    output
}
