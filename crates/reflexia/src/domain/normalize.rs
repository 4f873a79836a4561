//! LLM Output Normalizer
//!
//! Turns the raw response of a generation call into a [`Reflection`].
//! The model is asked for strict JSON, but real responses arrive in four
//! shapes: a native structured payload, bare JSON text, JSON inside a
//! fenced code block, and near-JSON with unquoted keys or single quotes.
//! The last shape gets exactly one repair pass; anything that still does
//! not parse is a hard failure.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::Reflection;

/// Raw result of one generation call, before normalization.
///
/// `structured` is set when the provider response carried a block
/// explicitly tagged as JSON content; `text` is the best-effort plain-text
/// output otherwise.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub structured: Option<Value>,
    pub text: Option<String>,
}

impl GenerationOutput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            structured: None,
            text: Some(text.into()),
        }
    }

    pub fn from_structured(value: Value) -> Self {
        Self {
            structured: Some(value),
            text: None,
        }
    }
}

static FENCE_RE: OnceLock<Regex> = OnceLock::new();
static BARE_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| {
        Regex::new(r"(?is)```(?:json)?\s*(.*?)```").expect("fence regex is valid")
    })
}

fn bare_key_re() -> &'static Regex {
    BARE_KEY_RE.get_or_init(|| {
        Regex::new(r"([{,]\s*)([A-Za-z0-9_]+)\s*:").expect("bare key regex is valid")
    })
}

/// Normalize a raw generation result into a [`Reflection`].
///
/// Resolution order: native structured payload, then text (fenced body if
/// fenced), strict parse, one repair pass. Both output fields are trimmed
/// and must be non-empty.
pub fn normalize(output: GenerationOutput) -> Result<Reflection, DomainError> {
    if let Some(value) = output.structured {
        return reflection_from(value);
    }

    let text = output.text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyResponse);
    }

    let body = fenced_body(text).unwrap_or(text);
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            let repaired = repair_json(body);
            serde_json::from_str(&repaired)
                .map_err(|e| DomainError::MalformedOutput(e.to_string()))?
        }
    };

    reflection_from(value)
}

/// Extract the body of a ``` fenced block (optionally tagged `json`).
fn fenced_body(text: &str) -> Option<&str> {
    fence_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One bounded repair pass for near-JSON: quote bare identifier keys, then
/// turn single quotes into double quotes. Best-effort by construction; a
/// string value containing an apostrophe will be corrupted, and the
/// subsequent parse failure is terminal.
fn repair_json(raw: &str) -> String {
    let keyed = bare_key_re().replace_all(raw, "${1}\"${2}\":");
    keyed.replace('\'', "\"")
}

fn reflection_from(value: Value) -> Result<Reflection, DomainError> {
    let insight = field_text(&value, "insight");
    let mini_story = field_text(&value, "miniStory");

    if insight.is_empty() {
        return Err(DomainError::EmptyField("insight"));
    }
    if mini_story.is_empty() {
        return Err(DomainError::EmptyField("miniStory"));
    }

    Ok(Reflection {
        insight,
        mini_story,
    })
}

fn field_text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_structured_payload_is_used_directly() {
        let output = GenerationOutput::from_structured(json!({
            "insight": "mirada",
            "miniStory": "fábula"
        }));
        let reflection = normalize(output).unwrap();
        assert_eq!(reflection.insight, "mirada");
        assert_eq!(reflection.mini_story, "fábula");
    }

    #[test]
    fn bare_json_text_parses() {
        let output =
            GenerationOutput::from_text(r#"{"insight":"a","miniStory":"b"}"#);
        let reflection = normalize(output).unwrap();
        assert_eq!(reflection.insight, "a");
        assert_eq!(reflection.mini_story, "b");
    }

    #[test]
    fn fenced_json_is_extracted() {
        let output = GenerationOutput::from_text(
            "```json\n{\"insight\":\"a\",\"miniStory\":\"b\"}\n```",
        );
        let reflection = normalize(output).unwrap();
        assert_eq!(reflection.insight, "a");
        assert_eq!(reflection.mini_story, "b");
    }

    #[test]
    fn untagged_fence_is_extracted() {
        let output =
            GenerationOutput::from_text("```\n{\"insight\":\"a\",\"miniStory\":\"b\"}\n```");
        assert!(normalize(output).is_ok());
    }

    #[test]
    fn repair_quotes_bare_keys_and_single_quotes() {
        let output = GenerationOutput::from_text("{insight: 'a', miniStory: 'b'}");
        let reflection = normalize(output).unwrap();
        assert_eq!(reflection.insight, "a");
        assert_eq!(reflection.mini_story, "b");
    }

    #[test]
    fn repair_runs_at_most_once() {
        // Still broken after the single repair pass: hard failure.
        let output = GenerationOutput::from_text("{insight: 'a', miniStory: 'b'");
        assert!(matches!(
            normalize(output),
            Err(DomainError::MalformedOutput(_))
        ));
    }

    #[test]
    fn empty_text_is_empty_response() {
        assert!(matches!(
            normalize(GenerationOutput::from_text("")),
            Err(DomainError::EmptyResponse)
        ));
        assert!(matches!(
            normalize(GenerationOutput::from_text("  \n ")),
            Err(DomainError::EmptyResponse)
        ));
        assert!(matches!(
            normalize(GenerationOutput::default()),
            Err(DomainError::EmptyResponse)
        ));
    }

    #[test]
    fn blank_field_is_empty_field() {
        let output = GenerationOutput::from_text(r#"{"insight":"  ","miniStory":"b"}"#);
        assert!(matches!(
            normalize(output),
            Err(DomainError::EmptyField("insight"))
        ));

        let output = GenerationOutput::from_text(r#"{"insight":"a"}"#);
        assert!(matches!(
            normalize(output),
            Err(DomainError::EmptyField("miniStory"))
        ));
    }

    #[test]
    fn fields_are_trimmed() {
        let output =
            GenerationOutput::from_text("{\"insight\":\"  a \",\"miniStory\":\"\\n b \"}");
        let reflection = normalize(output).unwrap();
        assert_eq!(reflection.insight, "a");
        assert_eq!(reflection.mini_story, "b");
    }
}
