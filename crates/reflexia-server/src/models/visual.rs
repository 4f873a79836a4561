//! Visual Reflection DTOs
//!
//! Wire types for the `/api/visual` endpoint. Field names follow the
//! front-end contract (`miniStory`, `sessionId`, `image_path`). Request
//! fields all default so an incomplete body becomes a validation failure
//! rather than a deserialization rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use reflexia::{CardChoice, CardNote, ReflectionOutcome, Session};

/// Reflection request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReflectRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub cards: Vec<CardInput>,
    #[serde(default)]
    pub notes: Vec<NoteInput>,
}

/// One chosen card
#[derive(Debug, Deserialize, ToSchema)]
pub struct CardInput {
    #[serde(default)]
    pub name: String,
    pub image_path: Option<String>,
}

/// One user note; `name` and `card_name` are accepted interchangeably for
/// the card the note refers to
#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteInput {
    pub name: Option<String>,
    pub card_name: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl From<CardInput> for CardChoice {
    fn from(input: CardInput) -> Self {
        CardChoice::new(input.name, input.image_path)
    }
}

impl From<NoteInput> for CardNote {
    fn from(input: NoteInput) -> Self {
        let card_name = match (input.name, input.card_name) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(card_name)) if !card_name.is_empty() => card_name,
            _ => String::new(),
        };
        CardNote::new(card_name, input.note)
    }
}

/// Reflection response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReflectResponse {
    pub insight: String,
    #[serde(rename = "miniStory")]
    pub mini_story: String,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub stored: bool,
}

impl From<ReflectionOutcome> for ReflectResponse {
    fn from(outcome: ReflectionOutcome) -> Self {
        Self {
            insight: outcome.reflection.insight,
            mini_story: outcome.reflection.mini_story,
            session_id: outcome.session_id,
            stored: outcome.stored,
        }
    }
}

/// One stored session, as returned by the history endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub question: String,
    pub insight: String,
    #[serde(rename = "miniStory")]
    pub mini_story: String,
    pub created_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            question: session.question,
            insight: session.insight,
            mini_story: session.mini_story,
            created_at: session.created_at,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_fields_default_when_missing() {
        let request: ReflectRequest = serde_json::from_str("{}").unwrap();
        assert!(request.question.is_empty());
        assert!(request.cards.is_empty());
        assert!(request.notes.is_empty());
    }

    #[test]
    fn note_card_name_prefers_name_then_card_name() {
        let note = NoteInput {
            name: Some("El puente".to_string()),
            card_name: Some("otro".to_string()),
            note: "n".to_string(),
        };
        assert_eq!(CardNote::from(note).card_name, "El puente");

        let note = NoteInput {
            name: Some(String::new()),
            card_name: Some("La llave".to_string()),
            note: "n".to_string(),
        };
        assert_eq!(CardNote::from(note).card_name, "La llave");

        let note = NoteInput {
            name: None,
            card_name: None,
            note: "n".to_string(),
        };
        assert_eq!(CardNote::from(note).card_name, "");
    }

    #[test]
    fn response_uses_wire_field_names() {
        let response = ReflectResponse {
            insight: "a".to_string(),
            mini_story: "b".to_string(),
            session_id: None,
            stored: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["miniStory"], "b");
        assert!(json.get("sessionId").is_none());
        assert_eq!(json["stored"], false);

        let id = Uuid::new_v4();
        let response = ReflectResponse {
            insight: "a".to_string(),
            mini_story: "b".to_string(),
            session_id: Some(id),
            stored: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionId"], id.to_string());
    }
}
