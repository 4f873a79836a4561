//! Reflexia API Routes
//!
//! - POST /api/visual - generate insight + fable for a question and three cards
//! - GET  /api/visual/sessions - stored sessions for the caller's anonymous identity
//! - GET  /health - health check

pub mod swagger;
pub mod visual;
