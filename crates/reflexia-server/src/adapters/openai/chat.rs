//! Chat Completions generator
//!
//! Calls `POST /v1/chat/completions` with the instructions as the system
//! message. This API shape never yields a native JSON block; the message
//! content is handed to the normalizer as a single text payload.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use reflexia::{DomainError, GenerationOutput, ReflectionGenerator};

use super::{api_error_message, BASE_URL, SCHEMA_NAME};

/// Generator backed by the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct ChatCompletionsGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl ChatCompletionsGenerator {
    /// Create a new generator using the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl ReflectionGenerator for ChatCompletionsGenerator {
    async fn generate(
        &self,
        instructions: &str,
        input: &str,
        schema: &Value,
    ) -> Result<GenerationOutput, DomainError> {
        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": instructions },
                { "role": "user", "content": input }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": schema,
                    "strict": true
                }
            }
        });

        let response = self
            .client
            .post(format!("{BASE_URL}/chat/completions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(DomainError::ExternalService(api_error_message(status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(e.to_string()))?;

        Ok(extract_output(&payload))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// The whole answer lives in `choices[0].message.content`.
fn extract_output(root: &Value) -> GenerationOutput {
    let text = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    GenerationOutput {
        structured: None,
        text,
    }
}
