/// hh.ru client: the single point of entry for all calls to the vacancies API.
///
/// Everything that needs postings goes through the `PostingSource` trait so the
/// aggregator and handlers can be exercised against scripted sources in tests.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::posting::{Posting, VacancyPage};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum HhError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

impl HhError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HhError::Api { status: 404, .. })
    }
}

/// Where postings come from. `HhClient` is the production implementation.
#[async_trait]
pub trait PostingSource: Send + Sync {
    /// One page of search results for `query`. `page` is zero-based.
    async fn fetch_page(
        &self,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Posting>, HhError>;

    /// The full vacancy document, including `key_skills` and `description`.
    async fn fetch_posting(&self, id: &str) -> Result<Posting, HhError>;
}

#[derive(Debug, Deserialize)]
struct HhErrorBody {
    description: Option<String>,
    #[serde(default)]
    errors: Vec<HhErrorItem>,
}

#[derive(Debug, Deserialize)]
struct HhErrorItem {
    #[serde(rename = "type")]
    kind: String,
    value: Option<String>,
}

/// Thin wrapper over the hh.ru vacancies API with retry on 429 and 5xx.
#[derive(Clone)]
pub struct HhClient {
    client: Client,
    base_url: String,
    area: u32,
}

impl HhClient {
    pub fn new(config: &Config) -> Result<Self, HhError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.hh_timeout_secs))
            .user_agent(config.hh_user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.hh_api_url.trim_end_matches('/').to_string(),
            area: config.hh_area,
        })
    }

    pub async fn search(
        &self,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<VacancyPage, HhError> {
        let params = [
            ("text", query.to_string()),
            ("area", self.area.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let result: VacancyPage = self.get_json(&self.base_url, &params).await?;

        debug!(
            "hh.ru search '{query}' page {page}: {} items (found {:?}, pages {:?})",
            result.items.len(),
            result.found,
            result.pages
        );

        Ok(result)
    }

    pub async fn fetch_vacancy(&self, id: &str) -> Result<Posting, HhError> {
        self.get_json(&vacancy_url(&self.base_url, id), &[]).await
    }

    /// GET with exponential backoff (1s, 2s) on transport errors, 429 and 5xx.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, HhError> {
        let mut last_error: Option<HhError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "hh.ru request attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url).query(params).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(HhError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("hh.ru returned {}: {}", status, body);
                last_error = Some(HhError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(HhError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body),
                });
            }

            let body = response.text().await?;
            return serde_json::from_str(&body).map_err(HhError::Parse);
        }

        Err(last_error.unwrap_or(HhError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl PostingSource for HhClient {
    async fn fetch_page(
        &self,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Posting>, HhError> {
        Ok(self.search(query, page, per_page).await?.items)
    }

    async fn fetch_posting(&self, id: &str) -> Result<Posting, HhError> {
        self.fetch_vacancy(id).await
    }
}

fn vacancy_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

/// Pulls a readable message out of an hh.ru error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<HhErrorBody>(body) else {
        return body.to_string();
    };

    if let Some(description) = parsed.description.filter(|d| !d.is_empty()) {
        return description;
    }

    let details: Vec<String> = parsed
        .errors
        .into_iter()
        .map(|e| match e.value {
            Some(value) => format!("{}: {}", e.kind, value),
            None => e.kind,
        })
        .collect();

    if details.is_empty() {
        body.to_string()
    } else {
        details.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacancy_url_joins_without_double_slash() {
        assert_eq!(
            vacancy_url("https://api.hh.ru/vacancies/", "42"),
            "https://api.hh.ru/vacancies/42"
        );
        assert_eq!(
            vacancy_url("https://api.hh.ru/vacancies", "42"),
            "https://api.hh.ru/vacancies/42"
        );
    }

    #[test]
    fn test_api_error_message_prefers_description() {
        let body = r#"{"description": "Not Found", "errors": [{"type": "not_found"}]}"#;
        assert_eq!(api_error_message(body), "Not Found");
    }

    #[test]
    fn test_api_error_message_lists_errors() {
        let body = r#"{"errors": [{"type": "bad_argument", "value": "per_page"}, {"type": "captcha_required"}]}"#;
        assert_eq!(
            api_error_message(body),
            "bad_argument: per_page, captcha_required"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("<html>502</html>"), "<html>502</html>");
        assert_eq!(api_error_message("{}"), "{}");
    }

    #[test]
    fn test_not_found_detection() {
        let err = HhError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!HhError::RateLimited { retries: 3 }.is_not_found());
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = HhClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url, "https://api.hh.ru/vacancies");
        assert_eq!(client.area, 113);
    }
}
