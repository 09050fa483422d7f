//! Text generation client.
//!
//! Thin client over the platform's text-generation endpoint. The caller hands
//! it a finished prompt; prompt construction lives in the chat crate.

use crate::transport::Transport;
use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Platform path of the text-generation endpoint.
pub const GENERATION_PATH: &str = "/domo/ai/v1/text/generation";

/// Reply used when the backend answers successfully but with zero candidates.
///
/// A soft fallback, deliberately distinct from a hard generation error: the
/// turn completes and the user sees this text instead of a failure.
pub const EMPTY_CHOICES_APOLOGY: &str = "I apologize, but I couldn't generate a response.";

/// Request body for the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerationRequest {
    input: String,
}

/// A single generation candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationChoice {
    pub output: String,
}

/// Response shape of the generation endpoint.
///
/// Only the first choice's output is consumed; the remaining fields are kept
/// for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub prompt: String,

    #[serde(default)]
    pub choices: Vec<GenerationChoice>,

    #[serde(default)]
    pub model_id: String,

    #[serde(default)]
    pub is_customer_model: bool,
}

/// Client for the platform text-generation endpoint.
pub struct GenerationClient {
    transport: Arc<dyn Transport>,
}

impl GenerationClient {
    /// Create a new generation client over a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Generate text for a prompt and return the first candidate's output.
    ///
    /// Backend responses with zero candidates resolve to
    /// [`EMPTY_CHOICES_APOLOGY`] rather than an error. Transport and backend
    /// failures surface as `AppError::Generation` and are terminal for the
    /// current turn; there is no retry.
    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        tracing::info!("Sending generation request via {}", self.transport.name());
        tracing::debug!("Prompt is {} chars", prompt.len());

        let body = serde_json::to_value(GenerationRequest {
            input: prompt.to_string(),
        })?;

        let value = self
            .transport
            .post(GENERATION_PATH, body)
            .await
            .map_err(|e| {
                AppError::Generation(format!("Failed to communicate with AI service: {}", e))
            })?;

        let response: GenerationResponse = serde_json::from_value(value).map_err(|e| {
            AppError::Generation(format!("Unexpected generation response: {}", e))
        })?;

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.output),
            None => {
                tracing::warn!(
                    model_id = %response.model_id,
                    "Generation backend returned zero candidates"
                );
                Ok(EMPTY_CHOICES_APOLOGY.to_string())
            }
        }
    }
}
