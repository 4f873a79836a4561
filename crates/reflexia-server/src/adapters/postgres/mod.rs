//! PostgreSQL Repository Implementations

mod session_repository;

pub use session_repository::PgSessionRepository;
