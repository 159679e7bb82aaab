//! AWS Secrets Manager backend.
//!
//! Responsibilities:
//! - Build one Secrets Manager client per backend on first lookup.
//! - Resolve credentials through the SDK default chain (environment, shared
//!   profile files, SSO, container and instance roles) unless static keys
//!   were given.
//!
//! Does NOT handle:
//! - Binary secrets; only `SecretString` values are returned.
//!
//! Invariants:
//! - `get_secret` blocks on a runtime owned by the backend and must not be
//!   called from inside a Tokio runtime.

use std::sync::OnceLock;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::config::{Credentials, Region};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use secrecy::{ExposeSecret, SecretString};
use tokio::runtime::{Builder, Runtime};

use super::{BackendError, SecretBackend};
use crate::constants::BACKEND_HTTP_TIMEOUT_SECS;

const BACKEND: &str = "AWS Secrets Manager";

/// Static IAM credentials that bypass the default provider chain.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<SecretString>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into().into()),
            session_token: session_token.map(|t| SecretString::new(t.into())),
        }
    }

    fn to_sdk(&self) -> Credentials {
        Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.expose_secret().to_string(),
            self.session_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
            None,
            "envcraft",
        )
    }
}

struct Connection {
    runtime: Runtime,
    client: Client,
}

/// Reads `SecretString` values from Secrets Manager in one region.
pub struct AwsSecretsBackend {
    region: String,
    endpoint: Option<String>,
    credentials: Option<AwsCredentials>,
    connection: OnceLock<Connection>,
}

impl std::fmt::Debug for AwsSecretsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsBackend")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("connected", &self.connection.get().is_some())
            .finish()
    }
}

impl AwsSecretsBackend {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint: None,
            credentials: None,
            connection: OnceLock::new(),
        }
    }

    /// Send requests to `endpoint` instead of the regional AWS host.
    ///
    /// Without this, the SDK still honours `AWS_ENDPOINT_URL_SECRETS_MANAGER`
    /// and `AWS_ENDPOINT_URL`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn connection(&self) -> Result<&Connection, String> {
        if let Some(connection) = self.connection.get() {
            return Ok(connection);
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("failed to start runtime: {}", e))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(BACKEND_HTTP_TIMEOUT_SECS))
                    .build(),
            );
        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let Some(credentials) = &self.credentials {
            loader = loader.credentials_provider(credentials.to_sdk());
        }
        let config = runtime.block_on(loader.load());
        let client = Client::new(&config);

        Ok(self
            .connection
            .get_or_init(|| Connection { runtime, client }))
    }

    fn fetch(&self, key: &str) -> Result<String, String> {
        let connection = self.connection()?;
        let output = connection
            .runtime
            .block_on(connection.client.get_secret_value().secret_id(key).send())
            .map_err(|e| DisplayErrorContext(e).to_string())?;
        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| "secret has no SecretString (binary secrets are not supported)".to_string())
    }
}

impl SecretBackend for AwsSecretsBackend {
    fn get_secret(&self, key: &str) -> Result<String, BackendError> {
        tracing::debug!(key, region = %self.region, "Fetching secret from Secrets Manager");
        self.fetch(key)
            .map_err(|message| BackendError::retrieval(BACKEND, key, message))
    }
}
