//! Reflection - the generated insight/fable pair.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The normalized output of one generation: both fields are trimmed and
/// guaranteed non-empty by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub insight: String,
    pub mini_story: String,
}

/// Result of one full pipeline run. `session_id` is present only when the
/// session row actually landed; `stored` is false when persistence is
/// disabled or the session insert failed.
#[derive(Debug, Clone)]
pub struct ReflectionOutcome {
    pub reflection: Reflection,
    pub session_id: Option<Uuid>,
    pub stored: bool,
}
