//! Visual Reflection Routes
//!
//! HTTP boundary of the pipeline: decode and validate the body, resolve
//! the anonymous identity, delegate to the application service, map domain
//! errors onto the status protocol (400 validation, 500 everything else;
//! 405 comes from method routing).

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use reflexia::domain::prompt;
use reflexia::{CardChoice, CardNote, DomainError};

use crate::identity;
use crate::models::{ErrorResponse, ReflectRequest, ReflectResponse, SessionResponse};
use crate::AppState;

/// Generate a reflection for a question, three cards and optional notes
#[utoipa::path(
    post,
    path = "/api/visual",
    request_body = ReflectRequest,
    responses(
        (status = 200, description = "Generated insight and fable", body = ReflectResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Generation or storage failure", body = ErrorResponse)
    ),
    tag = "Visual"
)]
pub async fn create_reflection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReflectRequest>,
) -> Response {
    let cards: Vec<CardChoice> = payload.cards.into_iter().map(Into::into).collect();
    let notes: Vec<CardNote> = payload.notes.into_iter().map(Into::into).collect();

    // Reject bad shapes before any identity cookie is issued and before
    // any downstream call is made.
    if let Err(err) = prompt::validate(&payload.question, &cards) {
        return error_response(err).into_response();
    }

    let identity = identity::resolve(&headers);
    let result = state
        .service
        .reflect(identity.anon_id, &payload.question, cards, notes)
        .await;

    let mut response = match result {
        Ok(outcome) => Json(ReflectResponse::from(outcome)).into_response(),
        Err(err) => error_response(err).into_response(),
    };

    // A freshly minted identity reaches the client even on the error path,
    // so a retry groups under the same identity.
    if let Some(cookie) = identity.set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

/// List stored sessions for the caller's anonymous identity
#[utoipa::path(
    get,
    path = "/api/visual/sessions",
    responses(
        (status = 200, description = "Sessions, newest first", body = Vec<SessionResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Visual"
)]
pub async fn list_sessions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = identity::resolve(&headers);

    let mut response = match state.service.history(identity.anon_id).await {
        Ok(sessions) => {
            let sessions: Vec<SessionResponse> =
                sessions.into_iter().map(Into::into).collect();
            Json(sessions).into_response()
        }
        Err(err) => error_response(err).into_response(),
    };

    if let Some(cookie) = identity.set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

/// Map a domain error to the wire: 400 for validation, 500 otherwise. The
/// full error is logged; only its message reaches the caller.
fn error_response(err: DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Reflection request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Any non-POST on the pipeline route; keeps the `{error}` body shape.
async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/visual",
            post(create_reflection).fallback(method_not_allowed),
        )
        .route("/api/visual/sessions", get(list_sessions))
}
