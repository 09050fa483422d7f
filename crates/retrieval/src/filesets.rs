//! Fileset directory.
//!
//! Lists the document collections available for retrieval. The platform
//! listing is filtered server-side to AI-enabled filesets and sorted by
//! name; a hardcoded default collection is always present and initially
//! selected even when the listing call fails or returns nothing.

use crate::types::Fileset;
use grounded_core::{AppError, AppResult};
use grounded_platform::Transport;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// Id of the built-in default collection.
pub const DEFAULT_FILESET_ID: &str = "b0b29ed0-d279-4258-b2d7-d3e8101f54e5";

/// Display name of the built-in default collection.
pub const DEFAULT_FILESET_NAME: &str = "Default Knowledge Base";

/// Platform path of the fileset listing endpoint.
pub const FILESET_SEARCH_PATH: &str = "/domo/files/v1/filesets/search";

/// The built-in default collection entry.
pub fn default_fileset() -> Fileset {
    Fileset::new(DEFAULT_FILESET_ID, DEFAULT_FILESET_NAME)
}

/// Response shape of the fileset listing endpoint.
#[derive(Debug, Deserialize)]
struct FilesetSearchResponse {
    #[serde(rename = "fileSets", default)]
    file_sets: Vec<Fileset>,
}

/// Client for the fileset directory.
pub struct FilesetDirectory {
    transport: Arc<dyn Transport>,
}

impl FilesetDirectory {
    /// Create a new directory client over a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fallible listing call.
    async fn fetch(&self) -> AppResult<Vec<Fileset>> {
        let body = json!({
            "fieldSort": [{"field": "name", "order": "ASC"}],
            "filters": [{"field": "ai_enabled", "value": [true], "operator": "EQUALS"}],
        });

        let value = self.transport.post(FILESET_SEARCH_PATH, body).await?;

        let response: FilesetSearchResponse = serde_json::from_value(value)
            .map_err(|e| AppError::Retrieval(format!("Unexpected fileset listing: {}", e)))?;

        Ok(response.file_sets)
    }

    /// List AI-enabled filesets, sorted by name ascending.
    ///
    /// Fail-open: a failing listing call logs a diagnostic and returns an
    /// empty list, leaving only the default collection selectable.
    pub async fn list(&self) -> Vec<Fileset> {
        match self.fetch().await {
            Ok(filesets) => {
                tracing::debug!(count = filesets.len(), "Fileset listing completed");
                filesets
            }
            Err(e) => {
                tracing::warn!("Fileset listing failed, falling back to default only: {}", e);
                Vec::new()
            }
        }
    }

    /// The merged, selectable listing: the default collection first, then
    /// the fetched entries deduplicated by id.
    pub async fn list_selectable(&self) -> Vec<Fileset> {
        merge_with_default(default_fileset(), self.list().await)
    }
}

/// Merge fetched filesets behind a default entry, deduplicating by id.
///
/// Order of first occurrence is preserved; the default entry is canonical
/// for its id, so a fetched entry reusing it is dropped.
pub fn merge_with_default(default: Fileset, fetched: Vec<Fileset>) -> Vec<Fileset> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(fetched.len() + 1);

    seen.insert(default.id.clone());
    merged.push(default);

    for fileset in fetched {
        if seen.insert(fileset.id.clone()) {
            merged.push(fileset);
        }
    }

    merged
}
