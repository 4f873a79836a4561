//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    CardInput, ErrorResponse, NoteInput, ReflectRequest, ReflectResponse, SessionResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::visual::create_reflection,
        super::visual::list_sessions,
    ),
    info(
        title = "Reflexia API",
        version = "0.1.0",
        description = "Reflexia - insight and fable generation from visual cards.\n\nA question plus three chosen cards become a structured reflection and a short fable, optionally persisted per anonymous identity.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Visual", description = "Visual card reflection pipeline"),
    ),
    components(
        schemas(
            ReflectRequest,
            CardInput,
            NoteInput,
            ReflectResponse,
            SessionResponse,
            ErrorResponse,
        )
    ),
)]
pub struct ApiDoc;
