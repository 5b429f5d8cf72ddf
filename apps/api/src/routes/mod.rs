pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_create_analysis;
use crate::persona::handlers::handle_persona_options;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Persona API
        .route("/api/v1/personas/options", get(handle_persona_options))
        // Analysis API
        .route("/api/v1/analyses", post(handle_create_analysis))
        .with_state(state)
}
