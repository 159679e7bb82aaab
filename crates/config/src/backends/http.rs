//! Lazily built blocking HTTP client shared by the remote backends.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::constants::BACKEND_HTTP_TIMEOUT_SECS;

/// Longest slice of an error body echoed back in retrieval errors.
const MAX_ERROR_BODY: usize = 200;

/// An HTTP client that is constructed on first use.
#[derive(Debug, Default)]
pub(crate) struct LazyClient {
    client: OnceLock<Client>,
}

impl LazyClient {
    pub(crate) fn get(&self) -> Result<&Client, reqwest::Error> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(BACKEND_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    #[cfg(test)]
    pub(crate) fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }
}

/// Turn a non-2xx response into a short error message.
pub(crate) fn check_status(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let body: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
    if body.is_empty() {
        Err(format!("HTTP {}", status))
    } else {
        Err(format!("HTTP {}: {}", status, body))
    }
}
