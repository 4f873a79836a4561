//! Reflection Application Service (Use Case)
//!
//! Orchestrates one pipeline run: validate -> build prompt -> generate ->
//! normalize -> best-effort persist. Persistence failure never blocks
//! returning the generated content; when no repository is configured the
//! write path is skipped without touching the network.

use std::sync::Arc;
use uuid::Uuid;

use reflexia::domain::prompt;
use reflexia::{
    normalize, CardChoice, CardNote, DomainError, ReflectionGenerator, ReflectionOutcome, Session,
    SessionCard, SessionNote, SessionRepository,
};

/// How many sessions the history endpoint returns at most.
const HISTORY_LIMIT: i64 = 50;

/// Application service for the reflection pipeline
pub struct ReflectionService<R: SessionRepository> {
    generator: Arc<dyn ReflectionGenerator>,
    repo: Option<Arc<R>>,
}

impl<R: SessionRepository> ReflectionService<R> {
    pub fn new(generator: Arc<dyn ReflectionGenerator>, repo: Option<Arc<R>>) -> Self {
        Self { generator, repo }
    }

    /// Run the full pipeline for one request.
    pub async fn reflect(
        &self,
        anon_id: Uuid,
        question: &str,
        cards: Vec<CardChoice>,
        notes: Vec<CardNote>,
    ) -> Result<ReflectionOutcome, DomainError> {
        prompt::validate(question, &cards)?;

        let input = prompt::build_input(question, &cards, &notes);
        let schema = prompt::output_schema();
        let raw = self
            .generator
            .generate(prompt::instructions(), &input, &schema)
            .await?;
        let reflection = normalize(raw)?;

        let (session_id, stored) = self
            .persist(anon_id, question, &reflection, &cards, &notes)
            .await;

        Ok(ReflectionOutcome {
            reflection,
            session_id,
            stored,
        })
    }

    /// Recent sessions for an anonymous identity, newest first. Empty when
    /// persistence is disabled.
    pub async fn history(&self, anon_id: Uuid) -> Result<Vec<Session>, DomainError> {
        match &self.repo {
            Some(repo) => repo.find_by_anon(anon_id, HISTORY_LIMIT).await,
            None => Ok(Vec::new()),
        }
    }

    /// Best-effort write of the session and its cards/notes.
    ///
    /// If the session row fails, persistence is abandoned entirely so no
    /// orphan cards or notes can exist. Card/note failures are logged and
    /// swallowed; the session id is still returned.
    async fn persist(
        &self,
        anon_id: Uuid,
        question: &str,
        reflection: &reflexia::Reflection,
        cards: &[CardChoice],
        notes: &[CardNote],
    ) -> (Option<Uuid>, bool) {
        let Some(repo) = &self.repo else {
            tracing::debug!("No session store configured - skipping persistence");
            return (None, false);
        };

        let session = Session::new(
            anon_id,
            question,
            reflection.insight.clone(),
            reflection.mini_story.clone(),
        );
        let session_id = match repo.insert_session(&session).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Failed to store session: {}", e);
                return (None, false);
            }
        };

        for (i, card) in cards.iter().enumerate() {
            let row = SessionCard::new(
                session_id,
                &card.name,
                card.image_path.clone(),
                (i + 1) as i32,
            );
            if let Err(e) = repo.insert_card(&row).await {
                tracing::warn!("Failed to store card {} for session {}: {}", i + 1, session_id, e);
            }
        }

        for note in notes {
            if note.note.trim().is_empty() {
                continue;
            }
            let row = SessionNote::new(session_id, &note.card_name, &note.note);
            if let Err(e) = repo.insert_note(&row).await {
                tracing::warn!("Failed to store note for session {}: {}", session_id, e);
            }
        }

        (Some(session_id), true)
    }
}
