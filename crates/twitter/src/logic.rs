use crate::api::{SearchError, TweetFetcher};
use crate::query::{build_search_query, EngagementFilters};
use crate::structs::SearchOutcome;

/// Bounds the recent-search endpoint accepts for `max_results`.
pub const MIN_RESULTS: usize = 10;
pub const MAX_RESULTS: usize = 100;

const FILTERED_DEFAULT: usize = 10;
const UNFILTERED_DEFAULT: usize = 50;

/// One search as requested by the client, after input parsing.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub keyword: String,
    pub filters: EngagementFilters,
    pub max_results: Option<usize>,
}

impl SearchRequest {
    /// Resolves the outbound page size: an explicit value is clamped to the
    /// upstream window, otherwise filtered searches default to a small page
    /// and unfiltered ones to a larger one.
    pub fn resolved_max_results(&self) -> usize {
        match self.max_results {
            Some(n) => n.clamp(MIN_RESULTS, MAX_RESULTS),
            None if self.filters.is_empty() => UNFILTERED_DEFAULT,
            None => FILTERED_DEFAULT,
        }
    }
}

/// Builds the query string, performs the single outbound call and reshapes
/// the upstream body for the client. Stateless; one attempt, no retries.
pub async fn run_search<F: TweetFetcher>(
    fetcher: &F,
    bearer_token: &str,
    request: &SearchRequest,
) -> Result<SearchOutcome, SearchError> {
    let query = build_search_query(&request.keyword, &request.filters);

    let page = fetcher
        .search_recent(bearer_token, &query, request.resolved_max_results())
        .await?;

    // Absent or null upstream fields become the neutral values the client
    // contract promises: an empty list and an empty map.
    let meta = match page.meta {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        meta => meta,
    };

    Ok(SearchOutcome {
        tweets: page.data.unwrap_or_default(),
        meta,
        query,
    })
}
