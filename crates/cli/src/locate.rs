//! Schema file discovery.

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Default schema locations, relative to the working directory flag.
pub const SEARCH_PATHS: &[&str] = &[
    "envcraft.json",
    "config/envcraft.json",
    ".envcraft/schema.json",
    "schema/envcraft.json",
];

/// Return `explicit` if given, else the first default location under `dir` that exists.
pub fn locate_schema(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(CliError::SchemaNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let candidates: Vec<PathBuf> = SEARCH_PATHS.iter().map(|p| dir.join(p)).collect();
    match candidates.iter().find(|p| p.is_file()) {
        Some(found) => {
            tracing::debug!(schema = %found.display(), "Located schema file");
            Ok(found.clone())
        }
        None => Err(CliError::SchemaNotFound {
            searched: candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_existing_default_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::create_dir_all(dir.path().join("schema")).unwrap();
        std::fs::write(dir.path().join("config/envcraft.json"), "{}").unwrap();
        std::fs::write(dir.path().join("schema/envcraft.json"), "{}").unwrap();

        let found = locate_schema(None, dir.path()).unwrap();
        assert_eq!(found, dir.path().join("config/envcraft.json"));
    }

    #[test]
    fn test_nothing_found_lists_searched_paths() {
        let dir = TempDir::new().unwrap();
        match locate_schema(None, dir.path()).unwrap_err() {
            CliError::SchemaNotFound { searched } => {
                assert_eq!(searched.len(), SEARCH_PATHS.len());
                assert_eq!(searched[0], dir.path().join("envcraft.json"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("custom.json");
        assert!(locate_schema(Some(&missing), dir.path()).is_err());

        std::fs::write(&missing, "{}").unwrap();
        assert_eq!(locate_schema(Some(&missing), dir.path()).unwrap(), missing);
    }
}
