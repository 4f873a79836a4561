//! Session - One Completed Reflection
//!
//! Pure domain entities without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session - one question -> insight/fable generation, optionally persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub anon_id: Uuid,
    pub question: String,
    pub insight: String,
    pub mini_story: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session record
    pub fn new(
        anon_id: Uuid,
        question: impl Into<String>,
        insight: impl Into<String>,
        mini_story: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            anon_id,
            question: question.into(),
            insight: insight.into(),
            mini_story: mini_story.into(),
            created_at: Utc::now(),
        }
    }
}

/// SessionCard - one of the three cards chosen for a session
///
/// `position` is 1-based and reflects the order the cards were submitted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCard {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub image_path: Option<String>,
    pub position: i32,
}

impl SessionCard {
    /// Create a new card row for a session
    pub fn new(
        session_id: Uuid,
        name: impl Into<String>,
        image_path: Option<String>,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            name: name.into(),
            image_path,
            position,
        }
    }
}

/// SessionNote - a free-text note the user attached to a card
///
/// `card_name` is the empty string when the note was not tied to a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionNote {
    pub id: Uuid,
    pub session_id: Uuid,
    pub card_name: String,
    pub note: String,
}

impl SessionNote {
    /// Create a new note row for a session
    pub fn new(session_id: Uuid, card_name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            card_name: card_name.into(),
            note: note.into(),
        }
    }
}
