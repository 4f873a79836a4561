//! Request/Response DTOs

mod visual;

pub use visual::*;
