//! Reflection Generator Port
//!
//! Abstract interface for LLM (Large Language Model) invocations. The two
//! implementations differ only in which API shape they call (Responses vs
//! Chat Completions); callers never branch on the shape, they hand the raw
//! result to the output normalizer.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::normalize::GenerationOutput;

/// LLM generation interface.
///
/// Given fixed instructions, a per-request input and the JSON schema the
/// output must satisfy, return whatever the provider produced - a native
/// structured payload, plain text believed to be JSON, or both.
///
/// # Example
///
/// ```rust,ignore
/// use reflexia::ports::ReflectionGenerator;
///
/// struct ResponsesGenerator { /* ... */ }
///
/// #[async_trait]
/// impl ReflectionGenerator for ResponsesGenerator {
///     async fn generate(&self, instructions: &str, input: &str, schema: &Value)
///         -> Result<GenerationOutput, DomainError> {
///         // POST /v1/responses
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait ReflectionGenerator: Send + Sync {
    /// Run one generation
    async fn generate(
        &self,
        instructions: &str,
        input: &str,
        schema: &Value,
    ) -> Result<GenerationOutput, DomainError>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
