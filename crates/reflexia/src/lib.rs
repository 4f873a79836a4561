//! Reflexia Domain Library
//!
//! Core domain types and interfaces for the Reflexia reflection service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Persisted models (Session, SessionCard, SessionNote)
//!   - `value_objects/`: Immutable value types (CardChoice, CardNote, Reflection)
//!   - `prompt`: Instructions and per-request input construction
//!   - `normalize`: Tolerant extraction of the model's JSON output
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use reflexia::domain::{prompt, normalize, Session};
//! use reflexia::ports::{ReflectionGenerator, SessionRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    normalize, CardChoice, CardNote, DomainError, GenerationOutput, Reflection, ReflectionOutcome,
    Session, SessionCard, SessionNote,
};
pub use ports::{ReflectionGenerator, SessionRepository};
