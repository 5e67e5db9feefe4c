use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::history::recent_or_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: i64,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub queries: Vec<String>,
}

/// GET /api/v1/history?user_id=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let limit = params.limit.unwrap_or(state.config.history_limit);
    let queries = recent_or_empty(state.history.as_ref(), params.user_id, limit).await;
    Json(HistoryResponse { queries })
}
