//! Card inputs submitted with a reflection request.

use serde::{Deserialize, Serialize};

/// A visual card chosen by the user. Only the name feeds the prompt; the
/// image path is carried through for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardChoice {
    pub name: String,
    pub image_path: Option<String>,
}

impl CardChoice {
    pub fn new(name: impl Into<String>, image_path: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_path,
        }
    }
}

/// A free-text note, optionally tied to a card by name.
///
/// `card_name` is already resolved to the empty string when the submitter
/// did not name a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardNote {
    pub card_name: String,
    pub note: String,
}

impl CardNote {
    pub fn new(card_name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            card_name: card_name.into(),
            note: note.into(),
        }
    }
}
