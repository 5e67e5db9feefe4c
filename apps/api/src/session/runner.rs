//! Runs the actions that reach the hh.ru API: vacancy search and skill analysis.

use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::record_or_warn;
use crate::session::messages::{NO_VACANCIES, SEARCH_UNAVAILABLE};
use crate::skills::aggregator::{aggregate, BatchResult};
use crate::skills::report::format_report;
use crate::state::AppState;
use crate::vacancies::format_search_results;

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub run_id: Uuid,
    pub query: String,
    pub result: BatchResult,
    pub report: String,
    pub finished_at: DateTime<Utc>,
}

/// Aggregates skills for `query` under the user's run lock.
///
/// Fails only on an empty query or when the user already has a run in flight;
/// upstream trouble shows up as a smaller (possibly empty) sample instead.
pub async fn run_analysis(
    state: &AppState,
    user_id: i64,
    query: &str,
    top_n: usize,
) -> Result<AnalysisOutcome, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let session = state.sessions.session(user_id);
    let _run = session
        .try_begin_run()
        .ok_or(AppError::AlreadyProcessing(user_id))?;

    let run_id = Uuid::new_v4();
    record_or_warn(state.history.as_ref(), user_id, query).await;

    let result = aggregate(
        query,
        &state.sample,
        state.postings.as_ref(),
        &state.extractor,
        |percent| session.publish_progress(percent),
    )
    .instrument(info_span!("skill_analysis", %run_id, user_id))
    .await;

    info!(
        "Run {run_id} for user {user_id}: {} postings analyzed",
        result.analyzed_count
    );

    let report = format_report(&result, top_n);

    Ok(AnalysisOutcome {
        run_id,
        query: query.to_string(),
        result,
        report,
        finished_at: Utc::now(),
    })
}

/// Shows the first page of vacancies for `query`. Upstream failures become a
/// user-facing message rather than an error.
pub async fn run_search(state: &AppState, user_id: i64, query: &str) -> String {
    record_or_warn(state.history.as_ref(), user_id, query).await;

    match state
        .postings
        .fetch_page(query, 0, state.config.search_page_size)
        .await
    {
        Ok(postings) if postings.is_empty() => NO_VACANCIES.to_string(),
        Ok(postings) => format_search_results(&postings),
        Err(e) => {
            warn!("Search for '{query}' failed: {e}");
            SEARCH_UNAVAILABLE.to_string()
        }
    }
}
