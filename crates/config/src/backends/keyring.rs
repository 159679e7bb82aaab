//! Secret backend backed by the operating system keyring.

use super::{BackendError, SecretBackend};

/// Looks up `key` as an account name under a fixed keyring service.
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl SecretBackend for KeyringBackend {
    fn get_secret(&self, key: &str) -> Result<String, BackendError> {
        let entry = keyring::Entry::new(&self.service, key)
            .map_err(|e| BackendError::retrieval("OS keyring", key, e))?;
        entry
            .get_password()
            .map_err(|e| BackendError::retrieval("OS keyring", key, e))
    }
}
