//! OpenAI Generator Implementations
//!
//! Two interchangeable implementations of the `ReflectionGenerator` port:
//! one against the Responses API, one against the Chat Completions API.
//! Which one runs is decided once at startup from configuration.

mod chat;
mod responses;

pub use chat::ChatCompletionsGenerator;
pub use responses::ResponsesGenerator;

use reqwest::StatusCode;

pub(crate) const BASE_URL: &str = "https://api.openai.com/v1";

/// Default model when the `MODEL` secret is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Name the output schema is registered under on the provider side.
pub(crate) const SCHEMA_NAME: &str = "ReflexiaV2";

/// Pull the provider's `error.message` out of a non-2xx body when it has
/// one, falling back to the raw body.
pub(crate) fn api_error_message(status: StatusCode, body: String) -> String {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    format!("OpenAI API error ({}): {}", status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_extracts_provider_message() {
        let body = r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#;
        let msg = api_error_message(StatusCode::UNAUTHORIZED, body.to_string());
        assert_eq!(msg, "OpenAI API error (401): Invalid API key");
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        let msg = api_error_message(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(msg, "OpenAI API error (502): upstream down");
    }
}
