//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod card;
mod reflection;

pub use card::*;
pub use reflection::*;
