//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use reflexia::{DomainError, Session, SessionCard, SessionNote, SessionRepository};

/// PostgreSQL implementation of SessionRepository
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    anon_id: Uuid,
    question: String,
    insight: String,
    mini_story: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            anon_id: row.anon_id,
            question: row.question,
            insight: row.insight,
            mini_story: row.mini_story,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert_session(&self, session: &Session) -> Result<Uuid, DomainError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO sessions (id, anon_id, question, insight, mini_story)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(session.id)
        .bind(session.anon_id)
        .bind(&session.question)
        .bind(&session.insight)
        .bind(&session.mini_story)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(id)
    }

    async fn insert_card(&self, card: &SessionCard) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO session_cards (id, session_id, name, image_path, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(card.id)
        .bind(card.session_id)
        .bind(&card.name)
        .bind(&card.image_path)
        .bind(card.position)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn insert_note(&self, note: &SessionNote) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO session_notes (id, session_id, card_name, note)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(note.id)
        .bind(note.session_id)
        .bind(&note.card_name)
        .bind(&note.note)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn find_by_anon(&self, anon_id: Uuid, limit: i64) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            "SELECT * FROM sessions WHERE anon_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(anon_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
