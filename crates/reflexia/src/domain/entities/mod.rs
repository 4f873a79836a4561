//! Entities
//!
//! Persisted domain models with identity.

mod session;

pub use session::*;
