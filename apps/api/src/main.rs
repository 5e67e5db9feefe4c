mod config;
mod db;
mod errors;
mod hh_client;
mod history;
mod models;
mod routes;
mod session;
mod skills;
mod state;
mod vacancies;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::hh_client::HhClient;
use crate::history::{HistoryStore, MemoryHistoryStore, PgHistoryStore};
use crate::routes::build_router;
use crate::session::registry::{evict_idle_sessions, SessionRegistry};
use crate::skills::aggregator::SampleOptions;
use crate::skills::extractor::SkillExtractor;
use crate::skills::matcher::VocabularyMatcher;
use crate::skills::vocabulary::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillscope API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary: file override or the builtin list
    let vocabulary = match &config.skills_file {
        Some(path) => SkillVocabulary::from_file(path)?,
        None => SkillVocabulary::builtin(),
    };
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    let matcher = VocabularyMatcher::new(Arc::new(vocabulary))
        .context("failed to compile skill vocabulary")?;
    let extractor = Arc::new(SkillExtractor::new(matcher));

    let sample = SampleOptions::new(config.analyze_sample_size, config.analyze_page_size)
        .context("invalid ANALYZE_SAMPLE_SIZE / ANALYZE_PAGE_SIZE")?;

    // Initialize hh.ru client
    let hh = HhClient::new(&config).context("failed to build hh.ru client")?;
    info!("hh.ru client initialized ({})", config.hh_api_url);

    // Search history: PostgreSQL when configured, otherwise in memory
    let history: Arc<dyn HistoryStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgHistoryStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, search history will not survive restarts");
            Arc::new(MemoryHistoryStore::default())
        }
    };

    let sessions = Arc::new(SessionRegistry::default());
    if config.session_idle_secs > 0 {
        tokio::spawn(evict_idle_sessions(
            sessions.clone(),
            Duration::from_secs(config.session_idle_secs),
        ));
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        postings: Arc::new(hh),
        history,
        extractor,
        sample,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
