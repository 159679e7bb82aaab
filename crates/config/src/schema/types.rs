//! Field tree types.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::NESTED_DELIMITER;
use crate::secret::{Secret, SecretRef};

static MODULE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*::)+").expect("module prefix pattern is valid")
});

/// Strip module paths from a Rust type name.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub fn display_type_name(raw: &str) -> String {
    MODULE_PREFIX.replace_all(raw, "").into_owned()
}

/// How a leaf's raw text is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Bool,
    Integer,
    Unsigned,
    Float,
    Secret,
}

impl ValueKind {
    /// Type name shown when a leaf was not declared from a Rust type.
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "bool",
            Self::Integer => "i64",
            Self::Unsigned => "u64",
            Self::Float => "f64",
            Self::Secret => "Secret",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
            Self::Secret => "secret",
        };
        f.write_str(name)
    }
}

/// Rust types that can back a leaf field.
pub trait FieldType {
    const KIND: ValueKind;
    const OPTIONAL: bool = false;
    /// Inclusive bounds for integer types narrower than 64 bits.
    const RANGE: Option<(i128, i128)> = None;

    fn type_name() -> String {
        display_type_name(std::any::type_name::<Self>())
    }
}

macro_rules! field_types {
    ($kind:ident: $($ty:ty),+) => {
        $(impl FieldType for $ty {
            const KIND: ValueKind = ValueKind::$kind;
        })+
    };
}

macro_rules! integer_types {
    ($kind:ident: $($ty:ty),+) => {
        $(impl FieldType for $ty {
            const KIND: ValueKind = ValueKind::$kind;
            const RANGE: Option<(i128, i128)> = Some((<$ty>::MIN as i128, <$ty>::MAX as i128));
        })+
    };
}

field_types!(String: String);
field_types!(Bool: bool);
integer_types!(Integer: i8, i16, i32, i64, isize);
integer_types!(Unsigned: u8, u16, u32, u64, usize);
field_types!(Float: f32, f64);
field_types!(Secret: Secret);

impl<T: FieldType> FieldType for Option<T> {
    const KIND: ValueKind = T::KIND;
    const OPTIONAL: bool = true;
    const RANGE: Option<(i128, i128)> = T::RANGE;
}

/// A scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub kind: ValueKind,
    pub type_name: String,
    pub optional: bool,
    /// Default as text; coerced exactly like values read from files.
    pub default: Option<String>,
    /// Backend reference used when a secret leaf has no value.
    pub backend_ref: Option<SecretRef>,
    /// Inclusive bounds checked after integer parsing.
    pub range: Option<(i128, i128)>,
}

impl Leaf {
    pub fn new(kind: ValueKind, type_name: impl Into<String>, optional: bool) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            optional,
            default: None,
            backend_ref: None,
            range: None,
        }
    }

    pub fn with_range(mut self, range: Option<(i128, i128)>) -> Self {
        self.range = range;
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && self.backend_ref.is_none() && !self.optional
    }

    pub fn is_secret(&self) -> bool {
        self.kind == ValueKind::Secret
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Leaf(Leaf),
    Nested(Vec<Field>),
}

/// A named node in the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub kind: FieldKind,
}

impl Field {
    /// Declare a leaf whose kind and type name come from `T`.
    pub fn new<T: FieldType>(name: impl Into<String>) -> Self {
        Self::leaf(
            name,
            Leaf::new(T::KIND, T::type_name(), T::OPTIONAL).with_range(T::RANGE),
        )
    }

    pub fn leaf(name: impl Into<String>, leaf: Leaf) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: FieldKind::Leaf(leaf),
        }
    }

    /// Declare a group whose children flatten to `NAME__CHILD`.
    pub fn nested(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: FieldKind::Nested(fields),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the default value. Ignored on nested fields.
    pub fn default(mut self, value: impl ToString) -> Self {
        if let FieldKind::Leaf(leaf) = &mut self.kind {
            leaf.default = Some(value.to_string());
        }
        self
    }

    /// Resolve this secret through `backend` when no value is supplied.
    /// Ignored on fields that are not secrets.
    pub fn from_backend(mut self, backend: impl Into<String>, key: impl Into<String>) -> Self {
        if let FieldKind::Leaf(leaf) = &mut self.kind
            && leaf.is_secret()
        {
            leaf.backend_ref = Some(SecretRef::new(backend, key));
        }
        self
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            FieldKind::Leaf(leaf) => Some(leaf),
            FieldKind::Nested(_) => None,
        }
    }
}

/// One node visited by `Schema::entries`, in declaration order.
#[derive(Debug, Clone)]
pub enum Entry<'a> {
    Group {
        env_name: String,
        field: &'a Field,
        depth: usize,
    },
    Leaf {
        env_name: String,
        /// Declared names from the root down to this leaf.
        path: Vec<&'a str>,
        field: &'a Field,
        leaf: &'a Leaf,
        depth: usize,
    },
}

impl<'a> Entry<'a> {
    pub fn env_name(&self) -> &str {
        match self {
            Self::Group { env_name, .. } | Self::Leaf { env_name, .. } => env_name,
        }
    }

    pub fn field(&self) -> &'a Field {
        match self {
            Self::Group { field, .. } | Self::Leaf { field, .. } => field,
        }
    }

    /// Nesting depth; root fields are 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Group { depth, .. } | Self::Leaf { depth, .. } => *depth,
        }
    }
}

/// A named configuration schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Every node in pre-order, groups before their children.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut out = Vec::new();
        collect(&self.fields, "", &[], 0, &mut out);
        out
    }

    /// Flattened upper-case names of every leaf.
    pub fn leaf_names(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| matches!(entry, Entry::Leaf { .. }))
            .map(|entry| entry.env_name().to_string())
            .collect()
    }

    /// Find a leaf by flattened name, ignoring case.
    pub fn find_leaf(&self, name: &str) -> Option<Entry<'_>> {
        let wanted = name.to_uppercase();
        self.entries()
            .into_iter()
            .find(|entry| matches!(entry, Entry::Leaf { .. }) && entry.env_name() == wanted)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.find_leaf(name).is_some()
    }
}

fn collect<'a>(
    fields: &'a [Field],
    prefix: &str,
    parents: &[&'a str],
    depth: usize,
    out: &mut Vec<Entry<'a>>,
) {
    for field in fields {
        let env_name = format!("{}{}", prefix, field.name.to_uppercase());
        let mut path = parents.to_vec();
        path.push(field.name.as_str());
        match &field.kind {
            FieldKind::Leaf(leaf) => out.push(Entry::Leaf {
                env_name,
                path,
                field,
                leaf,
                depth,
            }),
            FieldKind::Nested(children) => {
                let child_prefix = format!("{}{}", env_name, NESTED_DELIMITER);
                out.push(Entry::Group {
                    env_name,
                    field,
                    depth,
                });
                collect(children, &child_prefix, &path, depth + 1, out);
            }
        }
    }
}
