//! Command handlers for the Grounded CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod filesets;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use filesets::FilesetsCommand;
