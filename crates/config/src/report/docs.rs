//! Markdown reference documentation.

use std::path::Path;

use super::shown_default;
use crate::schema::{Entry, Schema};

/// Render Markdown documenting every field of `schema`.
///
/// Root fields use level-2 headings; each nesting level adds one.
pub fn render_docs(schema: &Schema) -> String {
    let mut lines = vec![
        "# Configuration Documentation\n".to_string(),
        "This document describes all available configuration options.\n".to_string(),
    ];
    for entry in schema.entries() {
        let heading = "#".repeat(entry.depth() + 2);
        let description = entry.field().description.as_deref();
        lines.push(format!("{} {}\n", heading, entry.env_name()));
        if let Some(text) = description {
            lines.push(format!("{}\n", text));
        }
        match entry {
            Entry::Group { .. } => lines.push(String::new()),
            Entry::Leaf { env_name, leaf, .. } => {
                let default = shown_default(leaf);
                lines.push(format!("- **Type:** `{}`", leaf.type_name));
                lines.push(format!(
                    "- **Required:** {}",
                    if leaf.is_required() { "Yes" } else { "No" }
                ));
                if let Some(default) = &default {
                    lines.push(format!("- **Default:** `{}`", default));
                }
                lines.push(String::new());
                lines.push("**Example:**".to_string());
                lines.push("```bash".to_string());
                match default.filter(|_| !leaf.is_secret()) {
                    Some(default) => lines.push(format!("{}={}", env_name, default)),
                    None => lines.push(format!("{}=<value>", env_name)),
                }
                lines.push("```\n".to_string());
            }
        }
    }
    lines.join("\n")
}

/// Write `render_docs(schema)` to `path`.
pub fn write_docs(schema: &Schema, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, render_docs(schema))?;
    tracing::info!(path = %path.display(), schema = %schema.name, "Generated configuration docs");
    Ok(())
}
