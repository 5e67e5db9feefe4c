use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::history::recent_or_empty;
use crate::session::messages;
use crate::session::registry::ProgressSnapshot;
use crate::session::runner::{run_analysis, run_search};
use crate::session::state_machine::{Action, ConversationState, Event};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub state: ConversationState,
    pub message: String,
    /// Recent queries offered when the user is asked for a query.
    pub suggestions: Vec<String>,
}

/// POST /api/v1/sessions/:user_id/events
pub async fn handle_event(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(event): Json<Event>,
) -> Result<Json<EventResponse>, AppError> {
    let session = state.sessions.session(user_id);
    let (action, next) = session.apply(event);
    debug!("User {user_id}: {action:?} -> {next:?}");

    let mut suggestions = Vec::new();
    let message = match action {
        Action::ShowMainMenu => messages::MAIN_MENU.to_string(),
        Action::ShowAbout => messages::ABOUT.to_string(),
        Action::PromptSearchQuery => {
            suggestions = suggest(&state, user_id).await;
            messages::SEARCH_PROMPT.to_string()
        }
        Action::PromptAnalyzeQuery => {
            suggestions = suggest(&state, user_id).await;
            messages::ANALYZE_PROMPT.to_string()
        }
        Action::RejectEmptyQuery => messages::EMPTY_QUERY.to_string(),
        Action::Unrecognized => messages::UNRECOGNIZED.to_string(),
        Action::RunSearch(query) => run_search(&state, user_id, &query).await,
        Action::RunAnalysis(query) => {
            let outcome =
                run_analysis(&state, user_id, &query, state.config.analyze_top_n).await?;
            format!("{}\n\n{}", messages::ANALYSIS_DONE, outcome.report)
        }
    };

    Ok(Json(EventResponse {
        state: next,
        message,
        suggestions,
    }))
}

/// Upper bound for a long-poll on progress.
const MAX_PROGRESS_WAIT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// Wait up to this many seconds for the next update of a running analysis.
    pub wait_secs: Option<u64>,
}

/// GET /api/v1/sessions/:user_id/progress?wait_secs=
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<ProgressQuery>,
) -> Json<ProgressSnapshot> {
    let session = state.sessions.session(user_id);
    let mut updates = session.subscribe_progress();

    if let Some(secs) = params.wait_secs.filter(|&s| s > 0) {
        if session.progress().running {
            let wait = Duration::from_secs(secs.min(MAX_PROGRESS_WAIT_SECS));
            // a timeout just means nothing changed
            let _ = tokio::time::timeout(wait, updates.changed()).await;
        }
    }

    Json(session.progress())
}

async fn suggest(state: &AppState, user_id: i64) -> Vec<String> {
    recent_or_empty(state.history.as_ref(), user_id, state.config.history_limit).await
}
