pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompt;

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::completion::CompletionService;
use crate::config::AppConfig;

pub use crate::prompt::{build_prompt, IssueReport, Language, PromptTemplate};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(config: AppConfig, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            config: Arc::new(config),
            completion,
        }
    }
}

pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "home-diagnosis-backend"
    })))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(api::analyze::analyze_home_issue))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
