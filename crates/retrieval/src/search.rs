//! Document search client.
//!
//! Issues semantic search against a selected fileset. The client is
//! fail-open: any transport or backend failure is logged and absorbed into
//! an empty match list, so the chat pipeline degrades to an ungrounded
//! answer rather than failing the whole turn.

use crate::types::RetrievalResult;
use grounded_core::{AppError, AppResult};
use grounded_platform::Transport;
use serde_json::json;
use std::sync::Arc;

/// Client for fileset document search.
pub struct RetrievalClient {
    transport: Arc<dyn Transport>,
}

impl RetrievalClient {
    /// Create a new retrieval client over a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Platform path of the query endpoint for a fileset.
    fn query_path(fileset_id: &str) -> String {
        format!("/domo/files/v1/filesets/{}/query", fileset_id)
    }

    /// Fallible inner query, kept separate from the fail-open wrapper.
    async fn query(
        &self,
        query: &str,
        fileset_id: &str,
        top_k: usize,
    ) -> AppResult<RetrievalResult> {
        let body = json!({
            "query": query,
            "directoryPath": "",
            "topK": top_k,
        });

        let value = self
            .transport
            .post(&Self::query_path(fileset_id), body)
            .await?;

        serde_json::from_value(value)
            .map_err(|e| AppError::Retrieval(format!("Unexpected search response: {}", e)))
    }

    /// Search a fileset for snippets relevant to a query.
    ///
    /// Returns matches in relevance rank order. Infallible by contract:
    /// failures emit a diagnostic log entry and yield an empty result.
    pub async fn search(&self, query: &str, fileset_id: &str, top_k: usize) -> RetrievalResult {
        match self.query(query, fileset_id, top_k).await {
            Ok(result) => {
                tracing::debug!(
                    fileset_id,
                    matches = result.matches.len(),
                    "Document search completed"
                );
                result
            }
            Err(e) => {
                tracing::warn!(fileset_id, "Document search failed, continuing without context: {}", e);
                RetrievalResult::default()
            }
        }
    }
}
