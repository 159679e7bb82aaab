//! Centralized constants for the envcraft workspace.
//!
//! This module contains default file names and backend settings used across
//! crates to avoid magic string duplication.

// =============================================================================
// File Names
// =============================================================================

/// Default base env file, loaded first.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Suffix of the local override file, loaded last.
pub const LOCAL_SUFFIX: &str = "local";

/// Default output path of the generated env template.
pub const DEFAULT_EXAMPLE_FILE: &str = ".env.example";

/// Default output path of the generated Markdown documentation.
pub const DEFAULT_DOCS_FILE: &str = "CONFIG.md";

// =============================================================================
// Naming
// =============================================================================

/// Separator joining a nested field to its parent in flattened names.
pub const NESTED_DELIMITER: &str = "__";

/// Replacement text for every rendering of a secret value.
pub const SECRET_MASK: &str = "***";

// =============================================================================
// Suggestions
// =============================================================================

/// Maximum number of "did you mean" suggestions per field error.
pub const MAX_SUGGESTIONS: usize = 3;

/// Minimum similarity ratio for a name to be suggested.
pub const SUGGESTION_CUTOFF: f64 = 0.6;

// =============================================================================
// Secret Backends
// =============================================================================

/// Name of the environment backend registered in every registry.
pub const ENV_BACKEND: &str = "env";

/// Default KV v2 mount point for HashiCorp Vault.
pub const DEFAULT_VAULT_MOUNT: &str = "secret";

/// Key Vault REST API version.
pub const AZURE_KEYVAULT_API_VERSION: &str = "7.4";

/// Default Microsoft identity platform host.
pub const DEFAULT_AZURE_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// HTTP timeout applied to every remote backend client, in seconds.
pub const BACKEND_HTTP_TIMEOUT_SECS: u64 = 10;
