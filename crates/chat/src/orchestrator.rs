//! Retrieval-augmented answering orchestration.
//!
//! One user turn runs a strictly linear, single-shot pipeline: search the
//! selected fileset, build a grounded prompt from whatever came back, call
//! the generation endpoint once, and return the answer with its sources.

use crate::prompt;
use grounded_core::AppResult;
use grounded_platform::{GenerationClient, Transport};
use grounded_retrieval::{RetrievalClient, RetrievalMatch};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A generated answer with source attribution.
#[derive(Debug, Clone, Serialize)]
pub struct ChatAnswer {
    /// Generated answer text
    pub text: String,

    /// Unique source paths of the matches used to ground the prompt,
    /// in order of first appearance; empty for ungrounded answers
    pub sources: Vec<String>,
}

/// Orchestrates the retrieval-augmentation pipeline.
pub struct Orchestrator {
    retrieval: RetrievalClient,
    generation: GenerationClient,
    top_k: usize,
}

impl Orchestrator {
    /// Create an orchestrator over a shared transport.
    ///
    /// `top_k` is the retrieval depth per turn; it is configuration, not a
    /// contract constant.
    pub fn new(transport: Arc<dyn Transport>, top_k: usize) -> Self {
        Self {
            retrieval: RetrievalClient::new(transport.clone()),
            generation: GenerationClient::new(transport),
            top_k,
        }
    }

    /// Answer a query against a fileset.
    ///
    /// Retrieval failures have already been absorbed by the retrieval client
    /// and degrade the turn to an ungrounded answer. Generation failures are
    /// not absorbed: they propagate to the caller as the turn's terminal
    /// error.
    pub async fn answer(&self, query: &str, fileset_id: &str) -> AppResult<ChatAnswer> {
        // 1. Search for context
        let retrieved = self.retrieval.search(query, fileset_id, self.top_k).await;

        // 2. Unique sources, order of first appearance
        let sources = unique_sources(&retrieved.matches);

        // 3. Grounded prompt, or the raw query when nothing was retrieved
        let final_prompt = prompt::build_prompt(query, &retrieved.matches)?;

        // 4. Generate the answer
        let text = self.generation.generate(&final_prompt).await?;

        Ok(ChatAnswer { text, sources })
    }
}

/// De-duplicated `metadata.path` values across matches, order of first
/// occurrence preserved.
pub fn unique_sources(matches: &[RetrievalMatch]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for m in matches {
        if seen.insert(m.metadata.path.clone()) {
            sources.push(m.metadata.path.clone());
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use grounded_platform::generation::GENERATION_PATH;
    use grounded_platform::MockTransport;
    use grounded_retrieval::{MatchContent, MatchMetadata};
    use serde_json::json;

    const FILESET: &str = "b0b29ed0-d279-4258-b2d7-d3e8101f54e5";

    fn query_path() -> String {
        format!("/domo/files/v1/filesets/{}/query", FILESET)
    }

    fn make_match(path: &str, text: &str) -> RetrievalMatch {
        RetrievalMatch {
            content: MatchContent {
                text: text.to_string(),
                kind: "text".to_string(),
            },
            metadata: MatchMetadata {
                file_id: format!("file-{}", path),
                path: path.to_string(),
            },
            score: 0.9,
        }
    }

    fn match_json(path: &str, text: &str) -> serde_json::Value {
        json!({
            "content": {"text": text, "type": "text"},
            "metadata": {"fileId": format!("file-{}", path), "path": path},
            "score": 0.9
        })
    }

    fn orchestrator_with(transport: MockTransport) -> (Arc<MockTransport>, Orchestrator) {
        let transport = Arc::new(transport);
        let orchestrator = Orchestrator::new(transport.clone(), 3);
        (transport, orchestrator)
    }

    #[test]
    fn test_unique_sources_order_of_first_appearance() {
        let matches = vec![
            make_match("manual.pdf", "one"),
            make_match("guide.md", "two"),
            make_match("manual.pdf", "three"),
        ];

        assert_eq!(unique_sources(&matches), vec!["manual.pdf", "guide.md"]);
    }

    #[test]
    fn test_unique_sources_empty() {
        assert!(unique_sources(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_answer_grounds_prompt_and_attributes_sources() {
        let (transport, orchestrator) = orchestrator_with(
            MockTransport::new()
                .with_response(
                    query_path(),
                    json!({"matches": [match_json("manual.pdf", "Towing capacity is 6000 lbs.")]}),
                )
                .with_response(
                    GENERATION_PATH,
                    json!({"choices": [{"output": "The towing capacity is 6000 lbs."}]}),
                ),
        );

        let answer = orchestrator
            .answer("What is the towing capacity?", FILESET)
            .await
            .unwrap();

        assert_eq!(answer.text, "The towing capacity is 6000 lbs.");
        assert_eq!(answer.sources, vec!["manual.pdf"]);

        let body = transport.last_body(GENERATION_PATH).unwrap();
        let sent_prompt = body["input"].as_str().unwrap();
        assert!(sent_prompt.contains("[Source: manual.pdf]\nTowing capacity is 6000 lbs."));
        assert!(sent_prompt.contains("USER QUESTION:\nWhat is the towing capacity?"));
    }

    #[tokio::test]
    async fn test_answer_without_matches_sends_raw_query() {
        let (transport, orchestrator) = orchestrator_with(
            MockTransport::new()
                .with_response(query_path(), json!({"matches": []}))
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "Hi there!"}]})),
        );

        let answer = orchestrator.answer("Hello", FILESET).await.unwrap();

        assert_eq!(answer.text, "Hi there!");
        assert!(answer.sources.is_empty());

        // No grounding wrapper of any kind: the prompt IS the query
        let body = transport.last_body(GENERATION_PATH).unwrap();
        assert_eq!(body["input"], json!("Hello"));
    }

    #[tokio::test]
    async fn test_answer_survives_retrieval_failure() {
        let (transport, orchestrator) = orchestrator_with(
            MockTransport::new()
                .with_failure(query_path(), "connection refused")
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "Best effort."}]})),
        );

        let answer = orchestrator.answer("Hello", FILESET).await.unwrap();

        assert_eq!(answer.text, "Best effort.");
        assert!(answer.sources.is_empty());

        let body = transport.last_body(GENERATION_PATH).unwrap();
        assert_eq!(body["input"], json!("Hello"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_terminal() {
        let (transport, orchestrator) = orchestrator_with(
            MockTransport::new()
                .with_response(
                    query_path(),
                    json!({"matches": [match_json("manual.pdf", "Towing capacity is 6000 lbs.")]}),
                )
                .with_failure(GENERATION_PATH, "service unavailable"),
        );

        let err = orchestrator
            .answer("What is the towing capacity?", FILESET)
            .await
            .unwrap_err();

        assert!(matches!(err, grounded_core::AppError::Generation(_)));
        // Exactly one retrieval and one generation attempt, no retries
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_answer_deduplicates_repeated_sources() {
        let (_, orchestrator) = orchestrator_with(
            MockTransport::new()
                .with_response(
                    query_path(),
                    json!({"matches": [
                        match_json("manual.pdf", "Chunk one"),
                        match_json("specs.md", "Chunk two"),
                        match_json("manual.pdf", "Chunk three")
                    ]}),
                )
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "ok"}]})),
        );

        let answer = orchestrator.answer("anything", FILESET).await.unwrap();
        assert_eq!(answer.sources, vec!["manual.pdf", "specs.md"]);
    }
}
