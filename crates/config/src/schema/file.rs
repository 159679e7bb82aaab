//! JSON schema files.
//!
//! A schema file mirrors the field tree:
//!
//! ```json
//! {
//!   "name": "AppConfig",
//!   "fields": [
//!     { "name": "database_url", "type": "string", "description": "PostgreSQL URL" },
//!     { "name": "debug", "type": "bool", "default": false },
//!     { "name": "api_key", "type": "secret", "backend": { "backend": "env", "key": "API_KEY" } },
//!     { "name": "cache", "fields": [ { "name": "port", "type": "unsigned", "default": 6379 } ] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use super::types::{Field, Leaf, Schema, ValueKind};
use crate::secret::SecretRef;

/// Errors that can occur when reading a schema file.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse schema file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    name: String,
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    name: String,
    #[serde(rename = "type")]
    kind: Option<ValueKind>,
    description: Option<String>,
    default: Option<Value>,
    #[serde(default)]
    optional: bool,
    backend: Option<SecretRef>,
    fields: Option<Vec<FieldSpec>>,
}

impl FieldSpec {
    fn into_field(self) -> Result<Field, String> {
        let field = match (self.kind, self.fields) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "field '{}' declares both a type and nested fields",
                    self.name
                ));
            }
            (None, None) => {
                return Err(format!(
                    "field '{}' needs either a type or nested fields",
                    self.name
                ));
            }
            (None, Some(children)) => {
                let children = children
                    .into_iter()
                    .map(FieldSpec::into_field)
                    .collect::<Result<Vec<_>, _>>()?;
                Field::nested(self.name, children)
            }
            (Some(kind), None) => {
                let type_name = if self.optional {
                    format!("Option<{}>", kind.rust_name())
                } else {
                    kind.rust_name().to_string()
                };
                let mut leaf = Leaf::new(kind, type_name, self.optional);
                leaf.default = self.default.and_then(default_text);
                if let Some(reference) = self.backend {
                    if kind != ValueKind::Secret {
                        return Err(format!(
                            "field '{}' has a backend but is not a secret",
                            self.name
                        ));
                    }
                    leaf.backend_ref = Some(reference);
                }
                Field::leaf(self.name, leaf)
            }
        };
        Ok(match self.description {
            Some(text) => field.description(text),
            None => field,
        })
    }
}

fn default_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

impl Schema {
    /// Parse a schema from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let file: SchemaFile = serde_json::from_str(content)?;
        let fields = file
            .fields
            .into_iter()
            .map(FieldSpec::into_field)
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde_json::Error::custom)?;
        Ok(Schema::new(file.name, fields))
    }

    /// Read and parse a schema file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| SchemaError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Entry, FieldKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "name": "AppConfig",
        "fields": [
            { "name": "database_url", "type": "string", "description": "PostgreSQL URL" },
            { "name": "debug", "type": "bool", "default": false },
            { "name": "timeout", "type": "float", "optional": true },
            { "name": "api_key", "type": "secret", "backend": { "backend": "env", "key": "API_KEY" } },
            { "name": "cache", "description": "Cache", "fields": [
                { "name": "port", "type": "unsigned", "default": 6379 }
            ] }
        ]
    }"#;

    #[test]
    fn test_from_json_builds_field_tree() {
        let schema = Schema::from_json(SAMPLE).unwrap();
        assert_eq!(schema.name, "AppConfig");
        assert_eq!(
            schema.leaf_names(),
            vec!["DATABASE_URL", "DEBUG", "TIMEOUT", "API_KEY", "CACHE__PORT"]
        );

        let debug = schema.fields[1].as_leaf().unwrap();
        assert_eq!(debug.default.as_deref(), Some("false"));
        assert_eq!(debug.type_name, "bool");

        let timeout = schema.fields[2].as_leaf().unwrap();
        assert_eq!(timeout.type_name, "Option<f64>");
        assert!(!timeout.is_required());

        let api_key = schema.fields[3].as_leaf().unwrap();
        assert_eq!(api_key.backend_ref, Some(SecretRef::new("env", "API_KEY")));

        assert!(matches!(schema.fields[4].kind, FieldKind::Nested(_)));
        match schema.find_leaf("cache__port") {
            Some(Entry::Leaf { leaf, .. }) => assert_eq!(leaf.default.as_deref(), Some("6379")),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = Schema::from_json(r#"{"name":"X","fields":[{"name":"a","type":"map"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_field_without_type_or_children_is_rejected() {
        let err = Schema::from_json(r#"{"name":"X","fields":[{"name":"a"}]}"#).unwrap_err();
        assert!(err.to_string().contains("needs either a type or nested fields"));
    }

    #[test]
    fn test_backend_on_non_secret_is_rejected() {
        let err = Schema::from_json(
            r#"{"name":"X","fields":[{"name":"a","type":"string","backend":{"backend":"env","key":"A"}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a secret"));
    }

    #[test]
    fn test_from_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Schema::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::Parse { ref path, .. } if path == file.path()));

        let missing = Schema::from_file(Path::new("/nonexistent/envcraft.json")).unwrap_err();
        assert!(matches!(missing, SchemaError::Read { .. }));
    }
}
