//! Per-user search history. Only used to offer recent queries as suggestions,
//! so failures are logged and degrade to "no history" instead of failing requests.

pub mod handlers;

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, user_id: i64, query: &str) -> Result<(), HistoryError>;

    /// Distinct queries, most recently used first.
    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<String>, HistoryError>;
}

/// PostgreSQL-backed history (table `search_history`, see `db::ensure_schema`).
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn record(&self, user_id: i64, query: &str) -> Result<(), HistoryError> {
        sqlx::query(
            "INSERT INTO search_history (user_id, search_query, search_date) VALUES ($1, $2, now())",
        )
        .bind(user_id)
        .bind(query)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<String>, HistoryError> {
        let rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT search_query
            FROM search_history
            WHERE user_id = $1
            GROUP BY search_query
            ORDER BY MAX(search_date) DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Distinct queries kept per user by `MemoryHistoryStore`; the oldest go first.
pub const MEMORY_QUERIES_PER_USER: usize = 50;

/// Process-local history, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    /// Per user, distinct queries from oldest to newest.
    entries: Mutex<HashMap<i64, VecDeque<String>>>,
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record(&self, user_id: i64, query: &str) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let queries = entries.entry(user_id).or_default();
        queries.retain(|q| q != query);
        queries.push_back(query.to_string());
        while queries.len() > MEMORY_QUERIES_PER_USER {
            queries.pop_front();
        }
        Ok(())
    }

    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<String>, HistoryError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .get(&user_id)
            .map(|queries| queries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Records a query, logging instead of failing.
pub async fn record_or_warn(store: &dyn HistoryStore, user_id: i64, query: &str) {
    if let Err(e) = store.record(user_id, query).await {
        warn!("Could not record query for user {user_id}: {e}");
    }
}

/// Recent queries, or an empty list if the store is unavailable.
pub async fn recent_or_empty(store: &dyn HistoryStore, user_id: i64, limit: usize) -> Vec<String> {
    store.recent(user_id, limit).await.unwrap_or_else(|e| {
        warn!("Could not load history for user {user_id}: {e}");
        Vec::new()
    })
}
