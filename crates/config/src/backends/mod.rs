//! Pluggable secret backends and the name-keyed registry that resolves them.
//!
//! Responsibilities:
//! - Define the `SecretBackend` capability and its error type.
//! - Store backends by name, replacing on re-registration.
//! - Cache remote backends under a name derived from their connection parameters.
//!
//! Does NOT handle:
//! - Memoizing resolved values (see `Secret`).
//!
//! Invariants:
//! - Every registry created with `BackendRegistry::new()` knows the `env` backend.
//! - Remote clients are built on first lookup, never at registration time.

mod aws;
mod azure;
mod env;
mod http;
mod keyring;
mod vault;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use thiserror::Error;

use crate::constants::ENV_BACKEND;

pub use aws::{AwsCredentials, AwsSecretsBackend};
pub use azure::{AzureCredential, AzureKeyVaultBackend};
pub use env::EnvBackend;
pub use keyring::KeyringBackend;
pub use vault::HashiCorpVaultBackend;

/// Errors raised while resolving a secret.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Secret backend '{name}' not registered. Available: {}", .available.join(", "))]
    NotRegistered { name: String, available: Vec<String> },

    /// The backend could not build its client or its lookup failed.
    #[error("Failed to retrieve secret '{key}' from {backend}: {message}")]
    Retrieval {
        backend: &'static str,
        key: String,
        message: String,
    },
}

impl BackendError {
    pub(crate) fn retrieval(backend: &'static str, key: &str, message: impl fmt::Display) -> Self {
        Self::Retrieval {
            backend,
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// A source of secret strings addressed by key.
pub trait SecretBackend: Send + Sync {
    /// Fetch the secret stored under `key`.
    fn get_secret(&self, key: &str) -> Result<String, BackendError>;
}

/// Name → backend mapping.
pub struct BackendRegistry {
    backends: RwLock<BTreeMap<String, Arc<dyn SecretBackend>>>,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.names())
            .finish()
    }
}

impl BackendRegistry {
    /// Create a registry with the `env` backend pre-registered.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(ENV_BACKEND, EnvBackend);
        registry
    }

    /// Create a registry with no backends at all.
    pub fn empty() -> Self {
        Self {
            backends: RwLock::new(BTreeMap::new()),
        }
    }

    /// The process-wide registry used by `Secret::get`.
    pub fn global() -> &'static BackendRegistry {
        static GLOBAL: OnceLock<BackendRegistry> = OnceLock::new();
        GLOBAL.get_or_init(BackendRegistry::new)
    }

    /// Store `backend` under `name`, replacing any previous registration.
    pub fn register(&self, name: impl Into<String>, backend: impl SecretBackend + 'static) {
        self.register_arc(name, Arc::new(backend));
    }

    pub fn register_arc(&self, name: impl Into<String>, backend: Arc<dyn SecretBackend>) {
        let name = name.into();
        tracing::debug!(backend = %name, "Registered secret backend");
        self.backends.write().insert(name, backend);
    }

    /// Look up a backend by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn SecretBackend>, BackendError> {
        let backends = self.backends.read();
        backends
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::NotRegistered {
                name: name.to_string(),
                available: backends.keys().cloned().collect(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.backends.read().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().contains_key(name)
    }

    /// Return `name`, registering `make()` under it only if nothing is registered yet.
    fn get_or_register<B, F>(&self, name: String, make: F) -> String
    where
        B: SecretBackend + 'static,
        F: FnOnce() -> B,
    {
        let mut backends = self.backends.write();
        backends
            .entry(name.clone())
            .or_insert_with(|| Arc::new(make()));
        name
    }

    /// Registry name of the AWS Secrets Manager backend for `region`.
    pub fn aws(&self, region: &str) -> String {
        self.get_or_register(format!("aws_{}", region), || {
            AwsSecretsBackend::new(region)
        })
    }

    /// Registry name of the Azure Key Vault backend for `vault_url`.
    pub fn azure(&self, vault_url: &str) -> String {
        self.get_or_register(format!("azure_{}", vault_url), || {
            AzureKeyVaultBackend::new(vault_url)
        })
    }

    /// Registry name of the HashiCorp Vault backend for `url`.
    ///
    /// The token only takes effect the first time a given URL is seen.
    pub fn vault(&self, url: &str, token: Option<String>) -> String {
        self.get_or_register(format!("vault_{}", url), || {
            HashiCorpVaultBackend::new(url, token)
        })
    }

    /// Registry name of the OS keyring backend for `service`.
    pub fn keyring(&self, service: &str) -> String {
        self.get_or_register(format!("keyring_{}", service), || {
            KeyringBackend::new(service)
        })
    }
}
