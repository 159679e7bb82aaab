//! Masked secret values.
//!
//! Responsibilities:
//! - Wrap a secret string so that `Display`, `Debug`, and `Serialize` never expose it.
//! - Defer resolution of backend-referenced secrets until first access.
//!
//! Does NOT handle:
//! - Talking to remote secret stores (see `backends`).
//!
//! Invariants:
//! - Every textual rendering of a `Secret` is exactly `SECRET_MASK`.
//! - A pending secret is resolved at most once; later backend changes are not observed.

use std::fmt;
use std::sync::OnceLock;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backends::{BackendError, BackendRegistry};
use crate::constants::{ENV_BACKEND, SECRET_MASK};

/// Pointer to a secret held by a named backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    /// Registry name of the backend.
    pub backend: String,
    /// Lookup key passed to the backend.
    pub key: String,
}

impl SecretRef {
    pub fn new(backend: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend, self.key)
    }
}

#[derive(Clone)]
enum Payload {
    Resolved(SecretString),
    Pending {
        reference: SecretRef,
        value: OnceLock<SecretString>,
    },
}

/// A configuration value that must never be printed.
#[derive(Clone)]
pub struct Secret {
    payload: Payload,
}

impl Secret {
    /// Wrap an already known value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            payload: Payload::Resolved(SecretString::new(value.into().into())),
        }
    }

    /// Create a secret that is fetched from `backend` on first access.
    pub fn from_backend(key: impl Into<String>, backend: impl Into<String>) -> Self {
        Self::from_ref(SecretRef::new(backend, key))
    }

    /// Create a secret read from the process environment on first access.
    pub fn from_env(key: impl Into<String>) -> Self {
        Self::from_backend(key, ENV_BACKEND)
    }

    /// Create a secret stored in AWS Secrets Manager.
    pub fn from_aws(key: impl Into<String>, region: &str) -> Self {
        Self::from_backend(key, BackendRegistry::global().aws(region))
    }

    /// Create a secret stored in Azure Key Vault.
    pub fn from_azure(key: impl Into<String>, vault_url: &str) -> Self {
        Self::from_backend(key, BackendRegistry::global().azure(vault_url))
    }

    /// Create a secret stored in a HashiCorp Vault KV v2 engine.
    pub fn from_vault(key: impl Into<String>, url: &str, token: Option<String>) -> Self {
        Self::from_backend(key, BackendRegistry::global().vault(url, token))
    }

    /// Create a secret stored in the OS keyring under `service`.
    pub fn from_keyring(account: impl Into<String>, service: &str) -> Self {
        Self::from_backend(account, BackendRegistry::global().keyring(service))
    }

    pub(crate) fn from_ref(reference: SecretRef) -> Self {
        Self {
            payload: Payload::Pending {
                reference,
                value: OnceLock::new(),
            },
        }
    }

    /// Backend reference, if this secret was not constructed from a literal.
    pub fn reference(&self) -> Option<&SecretRef> {
        match &self.payload {
            Payload::Resolved(_) => None,
            Payload::Pending { reference, .. } => Some(reference),
        }
    }

    /// Whether the value is available without contacting a backend.
    pub fn is_resolved(&self) -> bool {
        match &self.payload {
            Payload::Resolved(_) => true,
            Payload::Pending { value, .. } => value.get().is_some(),
        }
    }

    /// Resolve the secret using the process-wide backend registry.
    pub fn get(&self) -> Result<SecretString, BackendError> {
        self.get_with(BackendRegistry::global())
    }

    /// Resolve the secret using an explicit registry.
    ///
    /// The first successful lookup is memoized; failures are returned to the
    /// caller and leave the secret pending so a later call can retry.
    pub fn get_with(&self, registry: &BackendRegistry) -> Result<SecretString, BackendError> {
        match &self.payload {
            Payload::Resolved(secret) => Ok(secret.clone()),
            Payload::Pending { reference, value } => {
                if let Some(secret) = value.get() {
                    return Ok(secret.clone());
                }
                let backend = registry.resolve(&reference.backend)?;
                let fetched = backend.get_secret(&reference.key)?;
                Ok(value
                    .get_or_init(|| SecretString::new(fetched.into()))
                    .clone())
            }
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret('{}')", SECRET_MASK)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SECRET_MASK)
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(SECRET_MASK)
    }
}

/// Accepted input shapes: a literal string, or a `{ backend, key }` reference.
#[derive(Deserialize)]
#[serde(untagged)]
enum SecretInput {
    Literal(String),
    Reference(SecretRef),
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match SecretInput::deserialize(deserializer)? {
            SecretInput::Literal(value) => Secret::new(value),
            SecretInput::Reference(reference) => Secret::from_ref(reference),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::SecretBackend;
    use parking_lot::Mutex;
    use secrecy::ExposeSecret;
    use std::sync::Arc;

    /// Backend whose stored value can be changed between lookups.
    #[derive(Debug, Default)]
    struct MutableBackend {
        value: Mutex<String>,
        calls: Mutex<usize>,
    }

    impl SecretBackend for Arc<MutableBackend> {
        fn get_secret(&self, key: &str) -> Result<String, BackendError> {
            *self.calls.lock() += 1;
            Ok(format!("{}-{}", key, self.value.lock()))
        }
    }

    #[test]
    fn test_literal_secret_is_masked() {
        let secret = Secret::new("sensitive_data");

        assert_eq!(secret.to_string(), "***");
        assert_eq!(format!("{:?}", secret), "Secret('***')");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"***\"");
        assert_eq!(secret.get().unwrap().expose_secret(), "sensitive_data");
    }

    #[test]
    fn test_pending_secret_is_masked_before_and_after_resolution() {
        let registry = BackendRegistry::empty();
        let backend = Arc::new(MutableBackend::default());
        *backend.value.lock() = "v1".to_string();
        registry.register("mutable", backend);

        let secret = Secret::from_backend("db", "mutable");
        assert_eq!(secret.to_string(), "***");

        secret.get_with(&registry).unwrap();
        assert_eq!(secret.to_string(), "***");
        assert!(!format!("{:?}", secret).contains("db-v1"));
    }

    #[test]
    fn test_backend_secret_is_memoized() {
        let registry = BackendRegistry::empty();
        let backend = Arc::new(MutableBackend::default());
        *backend.value.lock() = "first".to_string();
        registry.register("mutable", backend.clone());

        let secret = Secret::from_backend("token", "mutable");
        assert!(!secret.is_resolved());
        assert_eq!(
            secret.get_with(&registry).unwrap().expose_secret(),
            "token-first"
        );
        assert!(secret.is_resolved());

        *backend.value.lock() = "second".to_string();
        assert_eq!(
            secret.get_with(&registry).unwrap().expose_secret(),
            "token-first"
        );
        assert_eq!(*backend.calls.lock(), 1);
    }

    #[test]
    fn test_unregistered_backend_propagates_error() {
        let registry = BackendRegistry::empty();
        let secret = Secret::from_backend("token", "missing");

        let err = secret.get_with(&registry).unwrap_err();
        assert!(matches!(err, BackendError::NotRegistered { ref name, .. } if name == "missing"));
        assert!(!secret.is_resolved());
    }

    #[test]
    fn test_deserialize_literal_and_reference() {
        let literal: Secret = serde_json::from_str("\"hunter2\"").unwrap();
        assert!(literal.reference().is_none());
        assert_eq!(literal.get().unwrap().expose_secret(), "hunter2");

        let pending: Secret =
            serde_json::from_str(r#"{"backend":"env","key":"API_KEY"}"#).unwrap();
        assert_eq!(
            pending.reference(),
            Some(&SecretRef::new("env", "API_KEY"))
        );
        assert!(!pending.is_resolved());
    }
}
