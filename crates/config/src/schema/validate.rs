//! Coercion of raw string values against a schema.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::types::{Entry, Leaf, Schema, ValueKind};
use crate::constants::SECRET_MASK;

/// Where the validator reads raw values from.
pub trait VarSource {
    /// Raw value for a flattened field name, if present.
    fn get(&self, name: &str) -> Option<String>;

    /// Keys subject to the unknown-field policy.
    fn input_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Case-insensitive in-memory source; every key is an input key.
impl VarSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    fn input_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Policy for input keys that match no declared leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    #[default]
    Ignore,
    Forbid,
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Lower-case flattened field name, or the offending input key.
    pub field: String,
    /// Machine-readable kind such as `missing` or `int_parsing`.
    pub kind: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, kind: &str, message: &str) -> Self {
        Self {
            field: field.into(),
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }
}

/// All field errors from one validation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} validation error(s) for {schema}", errors.len())]
pub struct ValidationError {
    pub schema: String,
    pub errors: Vec<FieldError>,
}

/// How a leaf obtained its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafOrigin {
    Supplied,
    Default,
    Backend,
    Unset,
}

/// Display data for one validated leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLeaf {
    pub env_name: String,
    pub origin: LeafOrigin,
    /// Rendered value, masked for secrets.
    pub display: String,
}

/// Successful validation output.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// Object tree keyed by declared field names, ready for deserialization.
    pub values: Value,
    pub leaves: Vec<ResolvedLeaf>,
}

/// Validate every leaf of `schema` against `source`.
pub fn validate(
    schema: &Schema,
    source: &dyn VarSource,
    unknown: UnknownFields,
) -> Result<Validated, ValidationError> {
    let mut root = Map::new();
    let mut leaves = Vec::new();
    let mut errors = Vec::new();

    for entry in schema.entries() {
        match entry {
            Entry::Group { .. } => {}
            Entry::Leaf {
                env_name,
                path,
                leaf,
                ..
            } => {
                let field = env_name.to_lowercase();
                let (value, origin) = match (source.get(&env_name), &leaf.default) {
                    (Some(raw), _) => match coerce(leaf, &raw) {
                        Ok(value) => (value, LeafOrigin::Supplied),
                        Err((kind, message)) => {
                            errors.push(FieldError::new(field, kind, message));
                            continue;
                        }
                    },
                    (None, Some(default)) => match coerce(leaf, default) {
                        Ok(value) => (value, LeafOrigin::Default),
                        Err((kind, message)) => {
                            errors.push(FieldError::new(field, kind, message));
                            continue;
                        }
                    },
                    (None, None) => match &leaf.backend_ref {
                        Some(reference) => (
                            serde_json::to_value(reference).unwrap_or(Value::Null),
                            LeafOrigin::Backend,
                        ),
                        None if leaf.optional => (Value::Null, LeafOrigin::Unset),
                        None => {
                            errors.push(FieldError::new(field, "missing", "Field required"));
                            continue;
                        }
                    },
                };
                leaves.push(ResolvedLeaf {
                    display: render(leaf, &value),
                    env_name,
                    origin,
                });
                insert_at_path(&mut root, &path, value);
            }
        }
    }

    if unknown == UnknownFields::Forbid {
        for key in source.input_keys() {
            if !schema.is_known(&key) {
                errors.push(FieldError::new(
                    key.to_lowercase(),
                    "extra_forbidden",
                    "Extra inputs are not permitted",
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(Validated {
            values: Value::Object(root),
            leaves,
        })
    } else {
        Err(ValidationError {
            schema: schema.name.clone(),
            errors,
        })
    }
}

impl Validated {
    /// Validated leaf by flattened name, ignoring case.
    pub fn leaf(&self, env_name: &str) -> Option<&ResolvedLeaf> {
        let wanted = env_name.to_uppercase();
        self.leaves.iter().find(|leaf| leaf.env_name == wanted)
    }
}

type CoerceError = (&'static str, &'static str);

fn coerce(leaf: &Leaf, raw: &str) -> Result<Value, CoerceError> {
    match leaf.kind {
        ValueKind::String | ValueKind::Secret => Ok(Value::String(raw.to_string())),
        ValueKind::Bool => parse_bool(raw).map(Value::Bool).ok_or((
            "bool_parsing",
            "Input should be a valid boolean, unable to interpret input",
        )),
        ValueKind::Integer => {
            let value = raw.trim().parse::<i64>().map_err(|_| {
                (
                    "int_parsing",
                    "Input should be a valid integer, unable to parse string as an integer",
                )
            })?;
            check_range(leaf, value.into()).map(|()| Value::from(value))
        }
        ValueKind::Unsigned => {
            let value = raw.trim().parse::<u64>().map_err(|_| {
                (
                    "int_parsing",
                    "Input should be a valid unsigned integer, unable to parse string as an integer",
                )
            })?;
            check_range(leaf, value.into()).map(|()| Value::from(value))
        }
        ValueKind::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or((
                "float_parsing",
                "Input should be a valid number, unable to parse string as a number",
            )),
    }
}

fn check_range(leaf: &Leaf, value: i128) -> Result<(), CoerceError> {
    match leaf.range {
        Some((min, max)) if value < min || value > max => Err((
            "int_parsing",
            "Input should be a valid integer, value is out of range for the declared type",
        )),
        _ => Ok(()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn render(leaf: &Leaf, value: &Value) -> String {
    match value {
        _ if leaf.is_secret() && !value.is_null() => SECRET_MASK.to_string(),
        Value::Null => "None".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert(last.to_string(), value);
}
