//! Session Repository Port
//!
//! Abstract interface for session persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Session, SessionCard, SessionNote};

/// Repository interface for sessions and their cards/notes.
///
/// Rows are append-only: sessions, cards and notes are never updated or
/// deleted once written.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a session row and return its identifier
    async fn insert_session(&self, session: &Session) -> Result<Uuid, DomainError>;

    /// Insert one card row for a session
    async fn insert_card(&self, card: &SessionCard) -> Result<(), DomainError>;

    /// Insert one note row for a session
    async fn insert_note(&self, note: &SessionNote) -> Result<(), DomainError>;

    /// Recent sessions for an anonymous identity, newest first
    async fn find_by_anon(&self, anon_id: Uuid, limit: i64) -> Result<Vec<Session>, DomainError>;
}
