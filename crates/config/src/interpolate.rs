//! `${VAR}` / `$VAR` substitution.
//!
//! Responsibilities:
//! - Replace variable references in raw file text with values from a variable
//!   map, falling back to the process environment.
//!
//! Does NOT handle:
//! - Escaping: a literal `$` followed by a name is always treated as a reference.
//! - Recursion: substituted values are never scanned again.
//!
//! Invariants:
//! - Unresolvable references are left exactly as written, `$`/`${}` syntax included.
//! - Map lookups are case-insensitive; environment lookups use the name as written.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("reference pattern is valid")
});

/// Variables visible to one interpolation pass.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    vars: HashMap<String, String>,
}

impl InterpolationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable; later inserts shadow earlier ones.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.vars.insert(name.to_lowercase(), value.into());
    }

    /// Add every pair from `vars`, shadowing existing names.
    pub fn extend<'a, I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in vars {
            self.insert(name, value);
        }
    }

    /// Value of `name` in the context, then in the process environment.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.vars
            .get(&name.to_lowercase())
            .cloned()
            .or_else(|| std::env::var(name).ok())
    }

    /// Substitute every reference in `text` in a single pass.
    pub fn interpolate(&self, text: &str) -> String {
        REFERENCE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                self.lookup(name).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
