use std::sync::Arc;

use crate::config::Config;
use crate::hh_client::PostingSource;
use crate::history::HistoryStore;
use crate::session::registry::SessionRegistry;
use crate::skills::aggregator::SampleOptions;
use crate::skills::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// hh.ru in production, scripted sources in tests.
    pub postings: Arc<dyn PostingSource>,
    pub history: Arc<dyn HistoryStore>,
    /// Built once at startup around the configured vocabulary.
    pub extractor: Arc<SkillExtractor>,
    pub sample: SampleOptions,
    pub sessions: Arc<SessionRegistry>,
}
