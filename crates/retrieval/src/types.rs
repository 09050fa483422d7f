//! Retrieval wire types.
//!
//! These mirror the JSON shapes of the platform's fileset endpoints.

use serde::{Deserialize, Serialize};

/// Text payload of a retrieval match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContent {
    /// Snippet text
    pub text: String,

    /// Content type reported by the backend (e.g., "text")
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Provenance metadata of a retrieval match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    /// Backend file identifier
    #[serde(default)]
    pub file_id: String,

    /// Path of the source document within its fileset
    pub path: String,
}

/// A ranked snippet returned by the retrieval backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalMatch {
    pub content: MatchContent,
    pub metadata: MatchMetadata,

    /// Relevance score assigned by the backend
    #[serde(default)]
    pub score: f64,
}

/// Result of a retrieval call.
///
/// Matches are ordered by relevance rank as returned by the backend and the
/// list may be empty. Not persisted anywhere; each call produces a fresh one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalResult {
    #[serde(default)]
    pub matches: Vec<RetrievalMatch>,
}

impl RetrievalResult {
    /// Whether the call produced no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A selectable document collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fileset {
    pub id: String,
    pub name: String,
}

impl Fileset {
    /// Create a fileset entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_retrieval_result() {
        let value = json!({
            "matches": [
                {
                    "content": {"text": "Towing capacity is 6000 lbs.", "type": "text"},
                    "metadata": {"fileId": "f-1", "path": "manual.pdf"},
                    "score": 0.92
                }
            ]
        });

        let result: RetrievalResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].content.text, "Towing capacity is 6000 lbs.");
        assert_eq!(result.matches[0].metadata.path, "manual.pdf");
        assert_eq!(result.matches[0].metadata.file_id, "f-1");
        assert!(!result.is_empty());
    }

    #[test]
    fn test_parse_empty_and_missing_matches() {
        let empty: RetrievalResult = serde_json::from_value(json!({"matches": []})).unwrap();
        assert!(empty.is_empty());

        // Some backends omit the field entirely
        let missing: RetrievalResult = serde_json::from_value(json!({})).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_fileset_equality() {
        let a = Fileset::new("sales-2023", "Q4 Sales Reports");
        let b = Fileset::new("sales-2023", "Q4 Sales Reports");
        assert_eq!(a, b);
    }
}
