//! Platform integration crate for the Grounded CLI.
//!
//! This crate models the hosting platform's authenticated request primitive
//! as an injected capability (the [`Transport`] trait) and builds the
//! text-generation client on top of it.
//!
//! # Transports
//! - **Domo**: authenticated HTTP against a Domo instance (default)
//! - **Mock**: canned responses for testing and development
//!
//! # Example
//! ```no_run
//! use grounded_platform::{GenerationClient, providers::DomoTransport};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(DomoTransport::new("https://acme.domo.com"));
//! let client = GenerationClient::new(transport);
//! let answer = client.generate("Hello, world!").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod generation;
pub mod providers;
pub mod transport;

// Re-export main types
pub use factory::create_transport;
pub use generation::{GenerationChoice, GenerationClient, GenerationResponse};
pub use providers::{DomoTransport, MockTransport};
pub use transport::Transport;
