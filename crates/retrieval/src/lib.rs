//! Document retrieval for the Grounded CLI.
//!
//! This crate talks to the platform's fileset endpoints: semantic search
//! over a selected document collection, and the directory of collections a
//! user can select from. Both clients are fail-open — an unreachable or
//! failing backend degrades to empty results instead of failing the turn.

pub mod filesets;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use filesets::{default_fileset, FilesetDirectory, DEFAULT_FILESET_ID, DEFAULT_FILESET_NAME};
pub use search::RetrievalClient;
pub use types::{Fileset, MatchContent, MatchMetadata, RetrievalMatch, RetrievalResult};
