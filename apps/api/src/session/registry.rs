use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use crate::session::run_lock::{RunGuard, RunLock};
use crate::session::state_machine::{transition, Action, ConversationState, Event};

/// Progress of the session's current (or last) analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub running: bool,
    pub percent: u8,
    pub started_at: Option<DateTime<Utc>>,
}

/// Everything owned for one user: conversation state, run lock, progress channel.
#[derive(Debug)]
pub struct Session {
    state: Mutex<ConversationState>,
    run_lock: RunLock,
    progress: watch::Sender<ProgressSnapshot>,
}

impl Default for Session {
    fn default() -> Self {
        let (progress, _) = watch::channel(ProgressSnapshot::default());
        Self {
            state: Mutex::new(ConversationState::default()),
            run_lock: RunLock::default(),
            progress,
        }
    }
}

impl Session {
    /// Applies an event to the state machine, returning the action to perform.
    pub fn apply(&self, event: Event) -> (Action, ConversationState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (action, next) = transition(*state, event);
        *state = next;
        (action, next)
    }

    /// Starts a run if none is in progress. Progress is reset to 0%.
    pub fn try_begin_run(&self) -> Option<ActiveRun<'_>> {
        let guard = self.run_lock.try_acquire()?;
        self.progress.send_replace(ProgressSnapshot {
            running: true,
            percent: 0,
            started_at: Some(Utc::now()),
        });
        Some(ActiveRun {
            session: self,
            _guard: guard,
        })
    }

    pub fn publish_progress(&self, percent: u8) {
        self.progress.send_modify(|p| p.percent = percent);
    }

    pub fn progress(&self) -> ProgressSnapshot {
        *self.progress.borrow()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress.subscribe()
    }
}

/// Holds the session's run lock. Dropping it (normally or because the request
/// future was cancelled) marks the run finished and releases the lock.
#[derive(Debug)]
pub struct ActiveRun<'a> {
    session: &'a Session,
    _guard: RunGuard<'a>,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.session.progress.send_modify(|p| p.running = false);
    }
}

#[derive(Debug)]
struct Entry {
    session: Arc<Session>,
    last_seen: Instant,
}

/// Sessions keyed by user id, created on first use and evicted once idle.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<i64, Entry>>,
}

impl SessionRegistry {
    pub fn session(&self, user_id: i64) -> Arc<Session> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.entry(user_id).or_insert_with(|| Entry {
            session: Arc::default(),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        entry.session.clone()
    }

    /// Drops sessions untouched for `max_idle`. A session still referenced
    /// elsewhere (a request or run in flight) is kept.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry.last_seen.elapsed() < max_idle || Arc::strong_count(&entry.session) > 1
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Background sweep started from `main`; runs until the process exits.
pub async fn evict_idle_sessions(registry: Arc<SessionRegistry>, max_idle: Duration) {
    let mut ticker = tokio::time::interval(max_idle);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let evicted = registry.evict_idle(max_idle);
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions, {} remain", registry.len());
        }
    }
}
