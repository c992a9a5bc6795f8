use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::structs::RecentSearchResponse;

/// Fields requested for every tweet in a search response.
pub const TWEET_FIELDS: &str = "created_at,author_id,text,public_metrics";

#[derive(Debug, Error)]
pub enum SearchError {
    /// Upstream quota exhausted (HTTP 429). `reset` carries the unix
    /// timestamp from the `x-rate-limit-reset` header when present.
    #[error("rate limited by search API")]
    RateLimited { reset: Option<i64>, detail: Value },

    /// Any other non-2xx answer, with the parsed error body attached.
    #[error("search API returned status {status}")]
    Upstream { status: u16, detail: Value },

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait TweetFetcher {
    async fn search_recent(
        &self,
        bearer_token: &str,
        query: &str,
        max_results: usize,
    ) -> Result<RecentSearchResponse, SearchError>;
}

/// Client for the recent-search endpoint of the Twitter API v2, authenticated
/// with an app-only bearer token.
#[derive(Clone, Debug)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
}

impl TwitterClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }
}

#[async_trait]
impl TweetFetcher for TwitterClient {
    async fn search_recent(
        &self,
        bearer_token: &str,
        query: &str,
        max_results: usize,
    ) -> Result<RecentSearchResponse, SearchError> {
        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let max_results = max_results.to_string();

        tracing::debug!("Recent search request: query={}", query);

        let res = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", bearer_token))
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("tweet.fields", TWEET_FIELDS),
            ])
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(res.json().await?);
        }

        let reset = res
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());

        // Error bodies are usually JSON but must never be trusted to be.
        let body = res.text().await.unwrap_or_default();
        let detail: Value = serde_json::from_str(&body).unwrap_or(Value::String(body));

        if status == StatusCode::TOO_MANY_REQUESTS {
            Err(SearchError::RateLimited { reset, detail })
        } else {
            Err(SearchError::Upstream {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
