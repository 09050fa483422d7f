//! Grounded answering and chat state for the Grounded CLI.
//!
//! This crate holds the one piece of real orchestration in the system: the
//! retrieval-augmentation pipeline (search documents, build a grounded
//! prompt, generate an answer, attribute sources), plus the UI-layer chat
//! state — an append-only transcript and the session that runs turns
//! against it.

pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod transcript;

// Re-export main types
pub use orchestrator::{unique_sources, ChatAnswer, Orchestrator};
pub use session::{ChatSession, ERROR_FALLBACK_MESSAGE, WELCOME_MESSAGE};
pub use transcript::{Message, Sender, Transcript};
