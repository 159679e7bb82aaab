//! Single-field explanations.

use std::fmt;

use super::shown_default;
use crate::schema::{Entry, Schema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub env_name: String,
    pub description: Option<String>,
    pub type_name: String,
    pub required: bool,
    /// Default text, masked for secrets.
    pub default: Option<String>,
}

/// Describe the leaf named `name` (flattened, any case), if it exists.
pub fn explain(schema: &Schema, name: &str) -> Option<Explanation> {
    match schema.find_leaf(name)? {
        Entry::Leaf {
            env_name,
            field,
            leaf,
            ..
        } => Some(Explanation {
            env_name,
            description: field.description.clone(),
            type_name: leaf.type_name.clone(),
            required: leaf.is_required(),
            default: shown_default(leaf),
        }),
        Entry::Group { .. } => None,
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n📝 {}\n", self.env_name)?;
        if let Some(description) = &self.description {
            writeln!(f, "  Description: {}", description)?;
        }
        writeln!(f, "  Type: {}", self.type_name)?;
        if self.required {
            writeln!(f, "  Required: Yes")?;
        } else {
            writeln!(f, "  Required: No")?;
            if let Some(default) = &self.default {
                writeln!(f, "  Default: {}", default)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn schema() -> Schema {
        Schema::new(
            "AppConfig",
            vec![
                Field::new::<String>("database_url").description("PostgreSQL connection string"),
                Field::nested(
                    "cache",
                    vec![Field::new::<Option<u16>>("port").default(6379)],
                ),
            ],
        )
    }

    #[test]
    fn test_explain_is_case_insensitive() {
        let found = explain(&schema(), "Database_Url").unwrap();
        assert_eq!(found.env_name, "DATABASE_URL");
        assert!(found.required);
        assert_eq!(
            found.to_string(),
            "\n📝 DATABASE_URL\n\n  Description: PostgreSQL connection string\n  Type: String\n  Required: Yes\n"
        );
    }

    #[test]
    fn test_explain_nested_leaf_with_default() {
        let found = explain(&schema(), "cache__port").unwrap();
        assert_eq!(found.type_name, "Option<u16>");
        assert!(!found.required);
        assert!(found.to_string().contains("  Default: 6379\n"));
    }

    #[test]
    fn test_explain_unknown_or_group_is_none() {
        assert!(explain(&schema(), "nope").is_none());
        assert!(explain(&schema(), "cache").is_none());
    }
}
