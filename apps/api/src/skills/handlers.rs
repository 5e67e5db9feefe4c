use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::runner::run_analysis;
use crate::skills::aggregator::SkillCount;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: i64,
    pub query: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub run_id: Uuid,
    pub query: String,
    pub analyzed_count: usize,
    pub ranked: Vec<SkillCount>,
    pub report: String,
    pub finished_at: DateTime<Utc>,
}

/// POST /api/v1/skills/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let top_n = req.top_n.unwrap_or(state.config.analyze_top_n);
    if top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }

    let outcome = run_analysis(&state, req.user_id, &req.query, top_n).await?;

    let mut ranked = outcome.result.ranked;
    ranked.truncate(top_n);

    Ok(Json(AnalyzeResponse {
        run_id: outcome.run_id,
        query: outcome.query,
        analyzed_count: outcome.result.analyzed_count,
        ranked,
        report: outcome.report,
        finished_at: outcome.finished_at,
    }))
}
