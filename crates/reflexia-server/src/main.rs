use std::sync::Arc;

use anyhow::anyhow;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use reflexia::ReflectionGenerator;

mod adapters;
mod application;
mod identity;
mod models;
mod routes;

use adapters::openai::DEFAULT_MODEL;
use adapters::{ChatCompletionsGenerator, PgSessionRepository, ResponsesGenerator};
use application::ReflectionService;

/// Type alias for the application service with the concrete repository
pub type AppReflectionService = ReflectionService<PgSessionRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppReflectionService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Reflexia API is running - three cards, one question, one fable".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🃏 Reflexia API initializing...");

    let api_key = secrets
        .get("OPENAI_API_KEY")
        .ok_or_else(|| anyhow!("OPENAI_API_KEY secret is required"))?;
    let model = secrets
        .get("MODEL")
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Select the LLM call shape once; handlers only see the trait object.
    let generator: Arc<dyn ReflectionGenerator> = match secrets.get("LLM_API").as_deref() {
        Some("chat") => {
            tracing::info!("🤖 Generator: Chat Completions API ({})", model);
            Arc::new(ChatCompletionsGenerator::new(api_key, model))
        }
        _ => {
            tracing::info!("🤖 Generator: Responses API ({})", model);
            Arc::new(ResponsesGenerator::new(api_key, model))
        }
    };

    // Persistence is an optional capability: no DATABASE_URL means the
    // pipeline runs without storing anything, and that is not an error.
    let repo = match secrets.get("DATABASE_URL") {
        Some(url) => match PgPoolOptions::new().max_connections(5).connect(&url).await {
            Ok(pool) => {
                sqlx::migrate!()
                    .run(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("✅ Database migrations completed - persistence enabled");
                Some(Arc::new(PgSessionRepository::new(pool)))
            }
            Err(e) => {
                tracing::warn!("⚠️  Failed to connect to Postgres: {} - persistence disabled", e);
                None
            }
        },
        None => {
            tracing::warn!("⚠️  No DATABASE_URL set - persistence disabled");
            None
        }
    };

    let service = Arc::new(ReflectionService::new(generator, repo));
    let state = AppState { service };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::visual::router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Reflexia API ready");

    Ok(router.into())
}
