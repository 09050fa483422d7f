//! Transport factory.
//!
//! Builds the platform transport from application configuration, resolving
//! the access token from the environment when one is configured.

use crate::providers::DomoTransport;
use crate::transport::Transport;
use grounded_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Create the platform transport from configuration.
///
/// # Errors
/// Returns `AppError::Config` if no instance URL is configured.
pub fn create_transport(config: &AppConfig) -> AppResult<Arc<dyn Transport>> {
    if config.instance.is_empty() {
        return Err(AppError::Config(
            "No platform instance configured. Set DOMO_INSTANCE or the platform.instance config key".to_string(),
        ));
    }

    let mut transport = DomoTransport::new(&config.instance);

    if let Some(token) = config.resolve_access_token() {
        transport = transport.with_access_token(token);
    } else {
        tracing::warn!("No access token configured; platform requests will be unauthenticated");
    }

    Ok(Arc::new(transport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transport() {
        let mut config = AppConfig::default();
        config.instance = "https://acme.domo.com".to_string();

        let transport = create_transport(&config).unwrap();
        assert_eq!(transport.name(), "domo");
    }

    #[test]
    fn test_create_transport_requires_instance() {
        let config = AppConfig::default();
        assert!(create_transport(&config).is_err());
    }
}
