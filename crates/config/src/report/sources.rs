//! Provenance report for a loaded configuration.

use std::fmt;

use crate::loader::SourceMap;
use crate::schema::{LeafOrigin, Validated};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub env_name: String,
    /// Rendered value, masked for secrets.
    pub value: String,
    /// File name, `environment`, `secret backend`, or `default value`.
    pub source: String,
}

/// Which file supplied each declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub rows: Vec<SourceRow>,
}

impl SourceReport {
    pub fn new(validated: &Validated, sources: &SourceMap) -> Self {
        let rows = validated
            .leaves
            .iter()
            .map(|leaf| {
                let source = match sources.get(&leaf.env_name.to_lowercase()) {
                    Some(file) => file.clone(),
                    None => match leaf.origin {
                        LeafOrigin::Supplied => "environment".to_string(),
                        LeafOrigin::Backend => "secret backend".to_string(),
                        LeafOrigin::Default | LeafOrigin::Unset => "default value".to_string(),
                    },
                };
                SourceRow {
                    env_name: leaf.env_name.clone(),
                    value: leaf.display.clone(),
                    source,
                }
            })
            .collect();
        Self { rows }
    }
}

impl fmt::Display for SourceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n📋 Environment Variable Sources:\n")?;
        for row in &self.rows {
            writeln!(f, "  {} = {}", row.env_name, row.value)?;
            writeln!(f, "    └─ loaded from {}", row.source)?;
        }
        Ok(())
    }
}
