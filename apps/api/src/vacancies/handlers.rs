use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::posting::Posting;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VacancyResponse {
    pub posting: Posting,
    pub skills: Vec<String>,
}

/// GET /api/v1/vacancies/:id
pub async fn handle_get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VacancyResponse>, AppError> {
    let posting = state.postings.fetch_posting(&id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound(format!("Vacancy {id} not found"))
        } else {
            AppError::Upstream(e)
        }
    })?;

    let skills = state.extractor.extract(&posting).into_iter().collect();
    Ok(Json(VacancyResponse { posting, skills }))
}
