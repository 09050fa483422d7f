//! Transport abstraction over the platform request primitive.
//!
//! The hosting platform exposes a single authenticated `post(url, body)`
//! capability; every endpoint this workspace talks to is reached through it.

use async_trait::async_trait;
use grounded_core::AppResult;
use serde_json::Value;

/// Trait for the platform's authenticated request primitive.
///
/// Modeled as an injected dependency rather than an ambient global so that
/// retrieval and generation clients can be exercised against a test double.
/// Implementations carry authentication themselves; callers only name the
/// platform path and the JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get the transport name (e.g., "domo").
    fn name(&self) -> &str;

    /// Issue an authenticated POST to a platform path with a JSON body.
    ///
    /// # Arguments
    /// * `path` - Platform path starting with '/' (e.g., "/domo/ai/v1/text/generation")
    /// * `body` - JSON request body
    ///
    /// # Returns
    /// The decoded JSON response body
    async fn post(&self, path: &str, body: Value) -> AppResult<Value>;
}
