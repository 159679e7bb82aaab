//! Per-field presence checklist.

use std::fmt;

use super::shown_default;
use crate::schema::{Entry, Schema, VarSource};

/// Outcome for one schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisStatus {
    /// A nested group header.
    Nested,
    Present,
    /// Absent, default will be used.
    Default(String),
    /// Absent, a secret backend reference will be used.
    Backend(String),
    /// Absent, optional.
    Unset,
    /// Absent and required.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisEntry {
    pub env_name: String,
    pub depth: usize,
    pub status: DiagnosisStatus,
}

/// Checklist of every field in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub entries: Vec<DiagnosisEntry>,
}

impl Diagnosis {
    /// Check every leaf of `schema` against `source`.
    pub fn run(schema: &Schema, source: &dyn VarSource) -> Self {
        let entries = schema
            .entries()
            .into_iter()
            .map(|entry| {
                let status = match &entry {
                    Entry::Group { .. } => DiagnosisStatus::Nested,
                    Entry::Leaf { env_name, leaf, .. } => {
                        if source.get(env_name).is_some() {
                            DiagnosisStatus::Present
                        } else if let Some(default) = shown_default(leaf) {
                            DiagnosisStatus::Default(default)
                        } else if let Some(reference) = &leaf.backend_ref {
                            DiagnosisStatus::Backend(reference.to_string())
                        } else if leaf.is_required() {
                            DiagnosisStatus::Missing
                        } else {
                            DiagnosisStatus::Unset
                        }
                    }
                };
                DiagnosisEntry {
                    env_name: entry.env_name().to_string(),
                    depth: entry.depth(),
                    status,
                }
            })
            .collect();
        Self { entries }
    }

    /// True when no required field is missing.
    pub fn is_valid(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|entry| entry.status == DiagnosisStatus::Missing)
    }

    pub fn missing(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.status == DiagnosisStatus::Missing)
            .map(|entry| entry.env_name.as_str())
            .collect()
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n🔍 Configuration Diagnosis:\n")?;
        for entry in &self.entries {
            let indent = "  ".repeat(entry.depth + 1);
            let name = &entry.env_name;
            match &entry.status {
                DiagnosisStatus::Nested => writeln!(f, "{indent}{name} (nested):")?,
                DiagnosisStatus::Present => writeln!(f, "{indent}✓ {name} present")?,
                DiagnosisStatus::Default(value) => {
                    writeln!(f, "{indent}✓ {name} using default ({value})")?
                }
                DiagnosisStatus::Backend(reference) => {
                    writeln!(f, "{indent}✓ {name} resolved from backend ({reference})")?
                }
                DiagnosisStatus::Unset => writeln!(f, "{indent}⚠ {name} not set (optional)")?,
                DiagnosisStatus::Missing => writeln!(f, "{indent}✗ {name} missing (required)")?,
            }
        }
        writeln!(f)?;
        if self.is_valid() {
            writeln!(f, "✅ All required variables are present")
        } else {
            writeln!(f, "❌ Some required variables are missing")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use crate::secret::Secret;
    use std::collections::HashMap;

    fn schema() -> Schema {
        Schema::new(
            "AppConfig",
            vec![
                Field::new::<String>("database_url"),
                Field::new::<bool>("debug").default(false),
                Field::new::<Option<String>>("log_file"),
                Field::new::<Secret>("api_key").from_backend("env", "API_KEY_SOURCE"),
                Field::nested("cache", vec![Field::new::<String>("host")]),
            ],
        )
    }

    #[test]
    fn test_statuses_and_validity() {
        let source: HashMap<String, String> =
            [("DATABASE_URL".to_string(), "x".to_string())].into();
        let diagnosis = Diagnosis::run(&schema(), &source);

        let statuses: Vec<(&str, &DiagnosisStatus)> = diagnosis
            .entries
            .iter()
            .map(|e| (e.env_name.as_str(), &e.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("DATABASE_URL", &DiagnosisStatus::Present),
                ("DEBUG", &DiagnosisStatus::Default("false".to_string())),
                ("LOG_FILE", &DiagnosisStatus::Unset),
                ("API_KEY", &DiagnosisStatus::Backend("env:API_KEY_SOURCE".to_string())),
                ("CACHE", &DiagnosisStatus::Nested),
                ("CACHE__HOST", &DiagnosisStatus::Missing),
            ]
        );
        assert!(!diagnosis.is_valid());
        assert_eq!(diagnosis.missing(), vec!["CACHE__HOST"]);
    }

    #[test]
    fn test_display_checklist() {
        let source: HashMap<String, String> = [
            ("DATABASE_URL".to_string(), "x".to_string()),
            ("CACHE__HOST".to_string(), "h".to_string()),
        ]
        .into();
        let text = Diagnosis::run(&schema(), &source).to_string();

        assert!(text.contains("  ✓ DATABASE_URL present\n"));
        assert!(text.contains("  ✓ DEBUG using default (false)\n"));
        assert!(text.contains("  ⚠ LOG_FILE not set (optional)\n"));
        assert!(text.contains("  CACHE (nested):\n    ✓ CACHE__HOST present\n"));
        assert!(text.ends_with("✅ All required variables are present\n"));
    }
}
