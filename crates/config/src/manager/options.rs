//! Options for a single load.

use std::path::PathBuf;

use crate::constants::{DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE};

/// How `ConfigManager::load` finds and treats env files.
///
/// Relative file names resolve against `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Environment tag selecting the `{base}.{env}` overlay.
    pub env: Option<String>,
    pub base_file: String,
    pub dir: PathBuf,
    pub example_file: PathBuf,
    /// Write the example template when it does not exist yet.
    pub auto_generate_example: bool,
    /// Print the source report after a successful load.
    pub show_sources: bool,
    /// Reject pool keys that match no declared field.
    pub strict: bool,
    /// Reuse and store the per-schema cached instance.
    pub cache: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env: None,
            base_file: DEFAULT_ENV_FILE.to_string(),
            dir: PathBuf::from("."),
            example_file: PathBuf::from(DEFAULT_EXAMPLE_FILE),
            auto_generate_example: true,
            show_sources: false,
            strict: false,
            cache: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn with_base_file(mut self, base_file: impl Into<String>) -> Self {
        self.base_file = base_file.into();
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_example_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.example_file = path.into();
        self
    }

    pub fn auto_generate_example(mut self, enabled: bool) -> Self {
        self.auto_generate_example = enabled;
        self
    }

    pub fn show_sources(mut self, enabled: bool) -> Self {
        self.show_sources = enabled;
        self
    }

    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Example template path resolved against `dir`.
    pub fn example_path(&self) -> PathBuf {
        self.dir.join(&self.example_file)
    }
}
