//! Medical chat backend
//!
//! HTTP façade that routes user conversations to an OpenAI-compatible
//! completion provider, augmented with static disease and nutrition tables,
//! heuristic language detection, and per-session conversation history.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use config::Config;
use services::dataset::{DiseaseTable, FoodTable};
use services::{ChatService, CompletionClient, DiseaseMatcher, FoodMatcher, WorkoutService};

/// Shared application state handed to every handler
pub struct AppState {
    pub config: Config,
    pub chat_service: ChatService,
    pub workout_service: WorkoutService,
    pub disease_count: usize,
    pub food_count: usize,
}

impl AppState {
    /// Build all services from configuration. Loads the lookup tables,
    /// wires the completion client, and assembles the dispatcher.
    pub fn initialize(config: Config) -> Result<Arc<Self>, anyhow::Error> {
        let diseases = Arc::new(DiseaseTable::load(config.datasets.disease_path.as_deref())?);
        let foods = Arc::new(FoodTable::load(config.datasets.food_path.as_deref())?);
        tracing::info!(
            "Loaded datasets: {} diseases, {} foods",
            diseases.len(),
            foods.len()
        );

        let disease_count = diseases.len();
        let food_count = foods.len();

        let backend = Arc::new(CompletionClient::new(config.llm.clone()));
        let chat_service = ChatService::new(
            backend,
            Arc::new(DiseaseMatcher::new(diseases)),
            Arc::new(FoodMatcher::new(foods)),
        );
        let workout_service = WorkoutService::new(&config.workout)?;

        Ok(Arc::new(Self { config, chat_service, workout_service, disease_count, food_count }))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedChat Backend API",
        description = "Medical chat assistant with symptom triage, disease lookup, and nutrition data"
    ),
    paths(handlers::chat::chat, handlers::workout::generate_workout, handlers::health::health),
    components(schemas(
        models::ChatRequest,
        models::ChatResponse,
        models::WorkoutProfile,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "Chat", description = "Conversational endpoints"),
        (name = "Workout", description = "Workout plan generation"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/generate-workout", post(handlers::generate_workout))
        .route("/api/health", get(handlers::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(middleware::locale_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
