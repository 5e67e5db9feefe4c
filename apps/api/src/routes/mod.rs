pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::history::handlers::handle_history;
use crate::session::handlers::{handle_event, handle_progress};
use crate::skills::handlers::handle_analyze;
use crate::state::AppState;
use crate::vacancies::handlers::handle_get_vacancy;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Conversation
        .route("/api/v1/sessions/:user_id/events", post(handle_event))
        .route("/api/v1/sessions/:user_id/progress", get(handle_progress))
        .route("/api/v1/history", get(handle_history))
        // Skill analysis
        .route("/api/v1/skills/analyze", post(handle_analyze))
        .route("/api/v1/vacancies/:id", get(handle_get_vacancy))
        .with_state(state)
}
