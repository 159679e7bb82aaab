//! Candidate file ordering and the merged variable pool.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::env::export_var;
use super::error::LoadError;
use super::parse::parse_assignments;
use crate::constants::{DEFAULT_ENV_FILE, LOCAL_SUFFIX};
use crate::interpolate::InterpolationContext;

/// Lower-case key → file that last defined it.
pub type SourceMap = BTreeMap<String, String>;

/// Merged key/value pairs with per-key source attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablePool {
    values: BTreeMap<String, String>,
    sources: SourceMap,
}

impl VariablePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under the lower-cased `key`, crediting `source`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>, source: impl Into<String>) {
        let key = key.to_lowercase();
        self.sources.insert(key.clone(), source.into());
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn source(&self, key: &str) -> Option<&str> {
        self.sources.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// Write every pair into the process environment under its upper-case name.
    pub fn export(&self) {
        for (key, value) in &self.values {
            export_var(&key.to_uppercase(), value);
        }
    }
}

/// Reads `base`, `base.{env}`, and `base.local` from one directory.
#[derive(Debug, Clone)]
pub struct LayeredLoader {
    dir: PathBuf,
    base: String,
    env: Option<String>,
}

impl Default for LayeredLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl LayeredLoader {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            dir: PathBuf::from("."),
            base: base.into(),
            env: None,
        }
    }

    /// Resolve candidate files against `dir` instead of the working directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env.filter(|tag| !tag.is_empty());
        self
    }

    /// Candidate file names in precedence order, lowest first.
    pub fn candidates(&self) -> Vec<String> {
        let mut files = vec![self.base.clone()];
        if let Some(env) = &self.env {
            files.push(format!("{}.{}", self.base, env));
        }
        files.push(format!("{}.{}", self.base, LOCAL_SUFFIX));
        files
    }

    /// Load every present candidate into a fresh pool.
    pub fn load(&self) -> Result<VariablePool, LoadError> {
        let mut pool = VariablePool::new();
        for name in self.candidates() {
            let path = self.dir.join(&name);
            match read_optional(&path)? {
                Some(content) => {
                    let before = pool.len();
                    merge_file(&mut pool, &name, &content);
                    tracing::debug!(
                        file = %path.display(),
                        new_keys = pool.len() - before,
                        "Loaded env file"
                    );
                }
                None => tracing::debug!(file = %path.display(), "Env file not present, skipping"),
            }
        }
        Ok(pool)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LoadError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Interpolate `content` against the pool plus its own raw pairs, then merge.
pub(crate) fn merge_file(pool: &mut VariablePool, source: &str, content: &str) {
    let mut context = InterpolationContext::new();
    context.extend(pool.iter());
    for (key, value) in parse_assignments(content) {
        context.insert(&key, value);
    }

    let interpolated = context.interpolate(content);
    for (key, value) in parse_assignments(&interpolated) {
        pool.insert(&key, value, source);
    }
}
