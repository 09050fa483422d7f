//! Mock transport with canned responses for testing and development.

use crate::transport::Transport;
use grounded_core::{AppError, AppResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A request recorded by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Platform path the request was sent to
    pub path: String,

    /// JSON body of the request
    pub body: Value,
}

/// Mock transport for testing and development.
///
/// Returns canned JSON responses keyed by platform path and records every
/// request it receives, so tests can assert on the exact bodies the clients
/// send. Individual paths can be configured to fail, which is how retrieval
/// and generation outages are simulated.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, Value>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create an empty mock transport.
    ///
    /// Requests to unconfigured paths fail with a transport error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response for a path.
    pub fn with_response(mut self, path: impl Into<String>, response: Value) -> Self {
        self.responses.insert(path.into(), response);
        self
    }

    /// Make requests to a path fail with a transport error.
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// All requests recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The body of the most recent request to a path, if any.
    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|call| call.path == path)
            .map(|call| call.body.clone())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                path: path.to_string(),
                body,
            });

        if let Some(message) = self.failures.get(path) {
            return Err(AppError::Transport(message.clone()));
        }

        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::Transport(format!("No canned response for {}", path)))
    }
}
