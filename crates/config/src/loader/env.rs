//! Process environment access.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Export resolved pool values into the process environment.
//! - Provide the `VarSource` the validator reads from.
//!
//! Invariants:
//! - Exported names are the upper-cased pool keys.
//! - Exports persist after loading returns; nothing is reverted.

use crate::schema::VarSource;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Set `NAME=value` in the process environment.
pub(crate) fn export_var(name: &str, value: &str) {
    // SAFETY: loading runs at startup or reload under the per-schema lock;
    // concurrent environment readers in other threads are the caller's concern
    // and this mutation is part of the documented loading contract.
    unsafe {
        std::env::set_var(name, value);
    }
}

/// Validator input backed by the process environment.
///
/// Lookups try the upper-cased name first, then the lower-cased one.
/// `keys` lists the pool keys subject to unknown-field checks.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    keys: Vec<String>,
}

impl EnvSource {
    /// Read the environment without any candidate extra keys.
    pub fn process() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl VarSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name.to_uppercase())
            .or_else(|_| std::env::var(name.to_lowercase()))
            .ok()
    }

    fn input_keys(&self) -> Vec<String> {
        self.keys.clone()
    }
}
