//! Azure Key Vault backend.
//!
//! Responsibilities:
//! - Acquire a bearer token for `https://vault.azure.net` (client-secret flow or static token).
//! - Read the current version of a Key Vault secret.
//!
//! Invariants:
//! - Credentials are read from the environment on first lookup unless given explicitly.
//! - Tokens are reused until one minute before they expire.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use super::http::{LazyClient, check_status};
use super::{BackendError, SecretBackend};
use crate::constants::{AZURE_KEYVAULT_API_VERSION, DEFAULT_AZURE_AUTHORITY_HOST};
use crate::loader::env_var_or_none;

const BACKEND: &str = "Azure Key Vault";
const VAULT_SCOPE: &str = "https://vault.azure.net/.default";
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// How the backend authenticates against Microsoft Entra ID.
#[derive(Debug, Clone)]
pub enum AzureCredential {
    /// A pre-acquired bearer token.
    AccessToken(SecretString),
    /// Service principal with a client secret.
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: SecretString,
        authority_host: String,
    },
}

impl AzureCredential {
    /// Read credentials from the standard `AZURE_*` variables.
    ///
    /// `AZURE_ACCESS_TOKEN` wins over the client-secret triple.
    pub fn from_env() -> Result<Self, String> {
        if let Some(token) = env_var_or_none("AZURE_ACCESS_TOKEN") {
            return Ok(Self::AccessToken(SecretString::new(token.into())));
        }
        match (
            env_var_or_none("AZURE_TENANT_ID"),
            env_var_or_none("AZURE_CLIENT_ID"),
            env_var_or_none("AZURE_CLIENT_SECRET"),
        ) {
            (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(Self::ClientSecret {
                tenant_id,
                client_id,
                client_secret: SecretString::new(client_secret.into()),
                authority_host: env_var_or_none("AZURE_AUTHORITY_HOST")
                    .unwrap_or_else(|| DEFAULT_AZURE_AUTHORITY_HOST.to_string()),
            }),
            _ => Err("no Azure credentials found; set AZURE_ACCESS_TOKEN or \
                 AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET"
                .to_string()),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct SecretBundle {
    value: String,
}

struct CachedToken {
    token: SecretString,
    refresh_at: Instant,
}

/// Reads secrets from a single Key Vault.
pub struct AzureKeyVaultBackend {
    vault_url: String,
    credential: Option<AzureCredential>,
    client: LazyClient,
    token: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for AzureKeyVaultBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureKeyVaultBackend")
            .field("vault_url", &self.vault_url)
            .finish_non_exhaustive()
    }
}

impl AzureKeyVaultBackend {
    pub fn new(vault_url: impl Into<String>) -> Self {
        Self {
            vault_url: vault_url.into(),
            credential: None,
            client: LazyClient::default(),
            token: Mutex::new(None),
        }
    }

    pub fn with_credential(mut self, credential: AzureCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    fn access_token(&self) -> Result<SecretString, String> {
        let mut cached = self.token.lock();
        if let Some(entry) = cached.as_ref()
            && Instant::now() < entry.refresh_at
        {
            return Ok(entry.token.clone());
        }

        let credential = match &self.credential {
            Some(credential) => credential.clone(),
            None => AzureCredential::from_env()?,
        };
        let (token, lifetime) = match credential {
            AzureCredential::AccessToken(token) => (token, None),
            AzureCredential::ClientSecret {
                tenant_id,
                client_id,
                client_secret,
                authority_host,
            } => {
                let client = self
                    .client
                    .get()
                    .map_err(|e| format!("failed to build HTTP client: {}", e))?;
                let endpoint = format!(
                    "{}/{}/oauth2/v2.0/token",
                    authority_host.trim_end_matches('/'),
                    tenant_id
                );
                let response = client
                    .post(endpoint)
                    .form(&[
                        ("grant_type", "client_credentials"),
                        ("client_id", client_id.as_str()),
                        ("client_secret", client_secret.expose_secret()),
                        ("scope", VAULT_SCOPE),
                    ])
                    .send()
                    .map_err(|e| format!("token request failed: {}", e))?;
                let body: TokenResponse = check_status(response)
                    .map_err(|e| format!("token request failed: {}", e))?
                    .json()
                    .map_err(|e| format!("unexpected token response: {}", e))?;
                (
                    SecretString::new(body.access_token.into()),
                    body.expires_in.map(Duration::from_secs),
                )
            }
        };

        if let Some(lifetime) = lifetime {
            *cached = Some(CachedToken {
                token: token.clone(),
                refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
            });
        }
        Ok(token)
    }

    fn secret_url(&self, key: &str) -> Result<Url, String> {
        let mut url =
            Url::parse(&self.vault_url).map_err(|e| format!("invalid vault URL: {}", e))?;
        url.path_segments_mut()
            .map_err(|_| "vault URL cannot be a base".to_string())?
            .pop_if_empty()
            .extend(["secrets", key]);
        Ok(url)
    }

    fn fetch(&self, key: &str) -> Result<String, String> {
        let client = self
            .client
            .get()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        let url = self.secret_url(key)?;
        let token = self.access_token()?;

        let response = client
            .get(url)
            .query(&[("api-version", AZURE_KEYVAULT_API_VERSION)])
            .bearer_auth(token.expose_secret())
            .send()
            .map_err(|e| e.to_string())?;
        let bundle: SecretBundle = check_status(response)?
            .json()
            .map_err(|e| format!("unexpected response body: {}", e))?;
        Ok(bundle.value)
    }
}

impl SecretBackend for AzureKeyVaultBackend {
    fn get_secret(&self, key: &str) -> Result<String, BackendError> {
        tracing::debug!(key, vault = %self.vault_url, "Fetching secret from Key Vault");
        self.fetch(key)
            .map_err(|message| BackendError::retrieval(BACKEND, key, message))
    }
}
