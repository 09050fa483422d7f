//! Transport implementations.

pub mod domo;
pub mod mock;

pub use domo::DomoTransport;
pub use mock::MockTransport;
