//! Chat session state.
//!
//! A session owns the transcript and runs one turn at a time against the
//! orchestrator. Turn-level failure handling lives here: a generation error
//! never escapes the session, it becomes a fallback bot message.

use crate::orchestrator::Orchestrator;
use crate::transcript::{Message, Transcript};

/// Greeting seeded into every new session.
pub const WELCOME_MESSAGE: &str = "Hello! I am your RAG assistant. I can answer questions based on your connected documents. How can I help you today?";

/// Bot reply used when a turn fails terminally.
pub const ERROR_FALLBACK_MESSAGE: &str =
    "I'm sorry, I encountered an error while processing your request.";

/// A single-user chat session over a selected fileset.
pub struct ChatSession {
    orchestrator: Orchestrator,
    transcript: Transcript,
    fileset_id: String,
}

impl ChatSession {
    /// Create a session, seeding the welcome message.
    pub fn new(orchestrator: Orchestrator, fileset_id: impl Into<String>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Message::bot(WELCOME_MESSAGE));

        Self {
            orchestrator,
            transcript,
            fileset_id: fileset_id.into(),
        }
    }

    /// The currently selected fileset id.
    pub fn fileset_id(&self) -> &str {
        &self.fileset_id
    }

    /// Switch the active fileset for subsequent turns.
    pub fn select_fileset(&mut self, fileset_id: impl Into<String>) {
        self.fileset_id = fileset_id.into();
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one chat turn and return the bot reply.
    ///
    /// Input is trimmed; empty input runs no turn and returns `None`. The
    /// user message is appended before the pipeline runs and stays in the
    /// transcript even when the turn fails — a terminal generation error is
    /// converted into [`ERROR_FALLBACK_MESSAGE`] instead of propagating.
    ///
    /// At most one turn is in flight at a time: `submit` borrows the session
    /// mutably for the whole turn. A started turn cannot be cancelled.
    pub async fn submit(&mut self, input: &str) -> Option<&Message> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        self.transcript.push(Message::user(query));

        let reply = match self.orchestrator.answer(query, &self.fileset_id).await {
            Ok(answer) => Message::bot(answer.text).with_sources(answer.sources),
            Err(e) => {
                tracing::error!("Chat turn failed: {}", e);
                Message::bot(ERROR_FALLBACK_MESSAGE)
            }
        };

        self.transcript.push(reply);
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Sender;
    use grounded_platform::generation::GENERATION_PATH;
    use grounded_platform::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    const FILESET: &str = "b0b29ed0-d279-4258-b2d7-d3e8101f54e5";

    fn query_path(fileset_id: &str) -> String {
        format!("/domo/files/v1/filesets/{}/query", fileset_id)
    }

    fn session_with(transport: MockTransport) -> (Arc<MockTransport>, ChatSession) {
        let transport = Arc::new(transport);
        let orchestrator = Orchestrator::new(transport.clone(), 3);
        (transport.clone(), ChatSession::new(orchestrator, FILESET))
    }

    #[test]
    fn test_new_session_seeds_welcome() {
        let (_, session) = session_with(MockTransport::new());

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].text, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_bot_messages() {
        let (_, mut session) = session_with(
            MockTransport::new()
                .with_response(
                    query_path(FILESET),
                    json!({"matches": [{
                        "content": {"text": "Towing capacity is 6000 lbs.", "type": "text"},
                        "metadata": {"fileId": "f-1", "path": "manual.pdf"},
                        "score": 0.92
                    }]}),
                )
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "6000 lbs."}]})),
        );

        let reply = session.submit("What is the towing capacity?").await.unwrap();
        assert_eq!(reply.text, "6000 lbs.");
        assert_eq!(reply.sources, Some(vec!["manual.pdf".to_string()]));

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 3); // welcome, user, bot
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "What is the towing capacity?");
        assert_eq!(messages[2].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let (transport, mut session) = session_with(
            MockTransport::new()
                .with_response(query_path(FILESET), json!({"matches": []}))
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "Hi!"}]})),
        );

        session.submit("  Hello  ").await.unwrap();

        assert_eq!(session.transcript().messages()[1].text, "Hello");
        let body = transport.last_body(GENERATION_PATH).unwrap();
        assert_eq!(body["input"], json!("Hello"));
    }

    #[tokio::test]
    async fn test_submit_ignores_empty_input() {
        let (transport, mut session) = session_with(MockTransport::new());

        assert!(session.submit("   ").await.is_none());

        // No turn ran: transcript untouched beyond the welcome, no requests
        assert_eq!(session.transcript().len(), 1);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message_and_appends_fallback() {
        let (_, mut session) = session_with(
            MockTransport::new()
                .with_response(query_path(FILESET), json!({"matches": []}))
                .with_failure(GENERATION_PATH, "service unavailable"),
        );

        let reply = session.submit("Hello").await.unwrap();
        assert_eq!(reply.text, ERROR_FALLBACK_MESSAGE);
        assert!(reply.sources.is_none());

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Hello");
    }

    #[tokio::test]
    async fn test_select_fileset_routes_subsequent_turns() {
        let (transport, mut session) = session_with(
            MockTransport::new()
                .with_response(query_path("hr-policies"), json!({"matches": []}))
                .with_response(GENERATION_PATH, json!({"choices": [{"output": "ok"}]})),
        );

        session.select_fileset("hr-policies");
        assert_eq!(session.fileset_id(), "hr-policies");

        session.submit("vacation policy?").await.unwrap();

        assert!(transport.last_body(&query_path("hr-policies")).is_some());
        assert!(transport.last_body(&query_path(FILESET)).is_none());
    }
}
