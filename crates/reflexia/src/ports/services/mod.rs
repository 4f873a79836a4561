//! Service Ports
//!
//! Abstract interfaces for external services.

mod generator;

pub use generator::*;
