//! `.env.example` template rendering.

use std::path::Path;

use crate::schema::{Entry, Schema};

/// Render an env template listing every field of `schema`.
///
/// Secret fields never carry their default into the template.
pub fn render_example(schema: &Schema) -> String {
    let mut lines = vec!["# Environment Configuration Template\n".to_string()];
    for entry in schema.entries() {
        let description = entry.field().description.as_deref();
        match entry {
            Entry::Group { env_name, .. } => {
                lines.push(format!("# {} (nested)", env_name));
                if let Some(text) = description {
                    lines.push(format!("# {}", text));
                }
                lines.push(String::new());
            }
            Entry::Leaf { env_name, leaf, .. } => {
                if let Some(text) = description {
                    lines.push(format!("# {}", text));
                }
                lines.push(format!("# Type: {}", leaf.type_name));
                let value = match &leaf.default {
                    Some(default) if !leaf.is_secret() => default.as_str(),
                    _ => "",
                };
                lines.push(format!("{}={}", env_name, value));
                lines.push(String::new());
            }
        }
    }
    lines.join("\n")
}

/// Write `render_example(schema)` to `path`.
pub fn write_example(schema: &Schema, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, render_example(schema))?;
    tracing::info!(path = %path.display(), schema = %schema.name, "Generated env example");
    Ok(())
}
