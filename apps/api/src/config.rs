use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Unset → search history is kept in memory only.
    pub database_url: Option<String>,
    pub hh_api_url: String,
    pub hh_area: u32,
    pub hh_user_agent: String,
    pub hh_timeout_secs: u64,
    pub analyze_sample_size: usize,
    pub analyze_page_size: usize,
    pub analyze_top_n: usize,
    pub search_page_size: usize,
    pub history_limit: usize,
    /// Conversation sessions idle this long are dropped; 0 keeps them forever.
    pub session_idle_secs: u64,
    pub skills_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            database_url: None,
            hh_api_url: "https://api.hh.ru/vacancies".to_string(),
            hh_area: 113,
            hh_user_agent: format!("skillscope/{}", env!("CARGO_PKG_VERSION")),
            hh_timeout_secs: 15,
            analyze_sample_size: 2000,
            analyze_page_size: 100,
            analyze_top_n: 10,
            search_page_size: 5,
            history_limit: 5,
            session_idle_secs: 3600,
            skills_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            database_url: optional_env("DATABASE_URL"),
            hh_api_url: optional_env("HH_API_URL").unwrap_or(defaults.hh_api_url),
            hh_area: parse_env("HH_AREA", defaults.hh_area)?,
            hh_user_agent: optional_env("HH_USER_AGENT").unwrap_or(defaults.hh_user_agent),
            hh_timeout_secs: parse_env("HH_TIMEOUT_SECS", defaults.hh_timeout_secs)?,
            analyze_sample_size: parse_env("ANALYZE_SAMPLE_SIZE", defaults.analyze_sample_size)?,
            analyze_page_size: parse_env("ANALYZE_PAGE_SIZE", defaults.analyze_page_size)?,
            analyze_top_n: parse_env("ANALYZE_TOP_N", defaults.analyze_top_n)?,
            search_page_size: parse_env("SEARCH_PAGE_SIZE", defaults.search_page_size)?,
            history_limit: parse_env("HISTORY_LIMIT", defaults.history_limit)?,
            session_idle_secs: parse_env("SESSION_IDLE_SECS", defaults.session_idle_secs)?,
            skills_file: optional_env("SKILLS_FILE").map(PathBuf::from),
        })
    }
}

/// Treats unset and blank variables alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        std::env::remove_var("SKILLSCOPE_TEST_UNSET");
        assert_eq!(parse_env("SKILLSCOPE_TEST_UNSET", 42usize).unwrap(), 42);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("SKILLSCOPE_TEST_PAGE", " 50 ");
        assert_eq!(parse_env("SKILLSCOPE_TEST_PAGE", 100usize).unwrap(), 50);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SKILLSCOPE_TEST_PORT", "eighty");
        let err = parse_env("SKILLSCOPE_TEST_PORT", 8080u16).unwrap_err();
        assert!(err.to_string().contains("SKILLSCOPE_TEST_PORT"));
    }

    #[test]
    fn test_blank_value_counts_as_unset() {
        std::env::set_var("SKILLSCOPE_TEST_BLANK", "   ");
        assert_eq!(optional_env("SKILLSCOPE_TEST_BLANK"), None);
    }

    #[test]
    fn test_defaults_match_hh_limits() {
        let config = Config::default();
        assert_eq!(config.analyze_page_size, 100);
        assert_eq!(config.analyze_sample_size, 2000);
        assert!(config.hh_user_agent.starts_with("skillscope/"));
    }

    #[test]
    fn test_idle_sessions_expire_after_an_hour_by_default() {
        assert_eq!(Config::default().session_idle_secs, 3600);
    }
}
