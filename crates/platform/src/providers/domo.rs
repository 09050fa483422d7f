//! Domo transport implementation.
//!
//! This module provides the authenticated HTTP transport against a Domo
//! instance. Authentication uses the developer token header issued by the
//! hosting environment; calls carry no local timeout and are never retried.

use crate::transport::Transport;
use grounded_core::{AppError, AppResult};
use serde_json::Value;

/// Header carrying the host-issued access token.
const TOKEN_HEADER: &str = "X-DOMO-Developer-Token";

/// Domo platform transport.
pub struct DomoTransport {
    /// Base URL of the platform instance
    base_url: String,

    /// Optional access token attached to every request
    access_token: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl DomoTransport {
    /// Create a new transport for a platform instance.
    ///
    /// # Arguments
    /// * `base_url` - Instance base URL (e.g., "https://acme.domo.com")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach an access token to every request.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Join a platform path onto the instance base URL.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl Transport for DomoTransport {
    fn name(&self) -> &str {
        "domo"
    }

    async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        let url = self.url_for(path);
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(&url).json(&body);

        if let Some(ref token) = self.access_token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to reach {}: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Transport(format!(
                "Platform request to {} failed ({}): {}",
                path, status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to decode response from {}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_name() {
        let transport = DomoTransport::new("https://acme.domo.com");
        assert_eq!(transport.name(), "domo");
    }

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let transport = DomoTransport::new("https://acme.domo.com/");
        assert_eq!(
            transport.url_for("/domo/ai/v1/text/generation"),
            "https://acme.domo.com/domo/ai/v1/text/generation"
        );
    }

    #[test]
    fn test_with_access_token() {
        let transport =
            DomoTransport::new("https://acme.domo.com").with_access_token("token-123");
        assert_eq!(transport.access_token.as_deref(), Some("token-123"));
    }
}
