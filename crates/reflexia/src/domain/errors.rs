//! Domain Errors
//!
//! Error types for the reflection pipeline.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model output is not valid JSON: {0}")]
    MalformedOutput(String),

    #[error("Model output field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    /// Whether this failure is the caller's fault (maps to a 4xx status).
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }
}
