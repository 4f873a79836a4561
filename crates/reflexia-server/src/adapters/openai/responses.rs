//! Responses API generator
//!
//! Calls `POST /v1/responses` with a JSON-schema output format. The
//! response may carry a native JSON content block; when it does not, the
//! `output_text` items are handed to the normalizer as plain text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use reflexia::{DomainError, GenerationOutput, ReflectionGenerator};

use super::{api_error_message, BASE_URL, SCHEMA_NAME};

/// Generator backed by the OpenAI Responses API.
#[derive(Clone)]
pub struct ResponsesGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl ResponsesGenerator {
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
impl ReflectionGenerator for ResponsesGenerator {
    async fn generate(
        &self,
        instructions: &str,
        input: &str,
        schema: &Value,
    ) -> Result<GenerationOutput, DomainError> {
        let request = json!({
            "model": self.model,
            "instructions": instructions,
            "input": input,
            "modalities": ["text"],
            "text": {
                "format": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": schema,
                    "strict": true
                }
            }
        });

        let response = self
            .client
            .post(format!("{BASE_URL}/responses"))
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

/// Walk `output[].content[]`: a `json` item becomes the structured payload,
/// `output_text` item texts are concatenated. A top-level `output_text`
/// string is accepted as a fallback.
fn extract_output(root: &Value) -> GenerationOutput {
    let mut structured = None;
    let mut text_parts: Vec<&str> = Vec::new();

    if let Some(blocks) = root.get("output").and_then(Value::as_array) {
        for block in blocks {
            let Some(items) = block.get("content").and_then(Value::as_array) else {
                continue;
            };
            for item in items {
                match item.get("type").and_then(Value::as_str) {
                    Some("json") => {
                        if structured.is_none() {
                            structured = item.get("json").filter(|v| !v.is_null()).cloned();
                        }
                    }
                    Some("output_text") => {
                        if let Some(text) = item.get("text").and_then(Value::as_str) {
                            text_parts.push(text);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    let text = if text_parts.is_empty() {
        root.get("output_text")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
    } else {
        Some(text_parts.concat())
    };

    GenerationOutput { structured, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_native_json_block() {
        let payload = json!({
            "output": [{
                "content": [{
                    "type": "json",
                    "json": { "insight": "a", "miniStory": "b" }
                }]
            }]
        });
        let output = extract_output(&payload);
        assert_eq!(output.structured.unwrap()["insight"], "a");
        assert!(output.text.is_none());
    }

    #[test]
    fn test_extract_concatenates_text_items() {
        let payload = json!({
            "output": [{
                "content": [
                    { "type": "output_text", "text": "{\"insight\":" },
                    { "type": "output_text", "text": "\"a\",\"miniStory\":\"b\"}" }
                ]
            }]
        });
        let output = extract_output(&payload);
        assert!(output.structured.is_none());
        assert_eq!(
            output.text.as_deref(),
            Some("{\"insight\":\"a\",\"miniStory\":\"b\"}")
        );
    }

    #[test]
    fn test_extract_top_level_output_text_fallback() {
        let payload = json!({ "output_text": "{\"insight\":\"a\",\"miniStory\":\"b\"}" });
        let output = extract_output(&payload);
        assert!(output.text.is_some());
    }

    #[test]
    fn test_extract_null_json_item_is_skipped() {
        let payload = json!({
            "output": [{
                "content": [{ "type": "json", "json": null }]
            }]
        });
        let output = extract_output(&payload);
        assert!(output.structured.is_none());
        assert!(output.text.is_none());
    }
}
