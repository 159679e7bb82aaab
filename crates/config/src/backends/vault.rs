//! HashiCorp Vault KV v2 backend.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use super::http::{LazyClient, check_status};
use super::{BackendError, SecretBackend};
use crate::constants::DEFAULT_VAULT_MOUNT;
use crate::loader::env_var_or_none;

const BACKEND: &str = "HashiCorp Vault";

#[derive(Deserialize)]
struct KvResponse {
    data: KvData,
}

#[derive(Deserialize)]
struct KvData {
    data: BTreeMap<String, serde_json::Value>,
}

/// Reads the `value` field of a KV v2 secret.
#[derive(Debug)]
pub struct HashiCorpVaultBackend {
    url: String,
    token: Option<SecretString>,
    mount_point: String,
    client: LazyClient,
}

impl HashiCorpVaultBackend {
    /// Create a backend for `url`; the token falls back to `VAULT_TOKEN`.
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        let token = token
            .or_else(|| env_var_or_none("VAULT_TOKEN"))
            .map(|t| SecretString::new(t.into()));
        Self {
            url: url.into(),
            token,
            mount_point: DEFAULT_VAULT_MOUNT.to_string(),
            client: LazyClient::default(),
        }
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = mount_point.into();
        self
    }

    fn secret_url(&self, key: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.url).map_err(|e| format!("invalid Vault URL: {}", e))?;
        url.path_segments_mut()
            .map_err(|_| "Vault URL cannot be a base".to_string())?
            .pop_if_empty()
            .extend(["v1", self.mount_point.as_str(), "data"])
            .extend(key.split('/'));
        Ok(url)
    }

    fn fetch(&self, key: &str) -> Result<String, String> {
        let client = self
            .client
            .get()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        let url = self.secret_url(key)?;

        let mut request = client.get(url);
        if let Some(token) = &self.token {
            request = request.header("X-Vault-Token", token.expose_secret());
        }
        let response = request.send().map_err(|e| e.to_string())?;
        let body: KvResponse = check_status(response)?
            .json()
            .map_err(|e| format!("unexpected response body: {}", e))?;

        match body.data.data.get("value") {
            Some(serde_json::Value::String(value)) => Ok(value.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err("secret has no 'value' field".to_string()),
        }
    }
}

impl SecretBackend for HashiCorpVaultBackend {
    fn get_secret(&self, key: &str) -> Result<String, BackendError> {
        tracing::debug!(key, url = %self.url, "Fetching secret from Vault");
        self.fetch(key)
            .map_err(|message| BackendError::retrieval(BACKEND, key, message))
    }
}
