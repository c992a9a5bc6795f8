use axum::extract::{Query, State};
use axum::response::Json;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use twitter::{EngagementFilters, SearchOutcome, SearchRequest};

use crate::auth;
use crate::error::AppError;
use crate::state::SharedState;

const DEFAULT_KEYWORD: &str = "mantle";

/// Raw search parameters as they arrive on the query string. The numeric
/// fields are kept as text and parsed leniently: anything that is not a
/// non-negative integer deterministically counts as 0 (absent for
/// `max_results`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub min_likes: Option<String>,
    pub min_retweets: Option<String>,
    pub min_replies: Option<String>,
    pub max_results: Option<String>,
}

fn lenient_u32(value: Option<&str>) -> u32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

impl SearchParams {
    fn into_request(self) -> SearchRequest {
        let keyword = self
            .keyword
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_KEYWORD.to_string());

        SearchRequest {
            keyword,
            filters: EngagementFilters {
                min_likes: lenient_u32(self.min_likes.as_deref()),
                min_retweets: lenient_u32(self.min_retweets.as_deref()),
                min_replies: lenient_u32(self.min_replies.as_deref()),
            },
            max_results: self.max_results.and_then(|v| v.trim().parse().ok()),
        }
    }
}

/// The search gateway. Session gate first, then one outbound call, then
/// reshaping; all failure kinds are mapped by [`AppError`].
pub async fn search_tweets(
    State(state): State<SharedState>,
    jar: SignedCookieJar,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchOutcome>, AppError> {
    // Anonymous callers are rejected before anything goes upstream.
    if auth::current_user(&jar).is_none() {
        return Err(AppError::Auth);
    }

    let request = params.into_request();
    tracing::info!("Searching tweets: keyword={}", request.keyword);

    let outcome =
        twitter::run_search(&state.twitter, &state.config.bearer_token, &request).await?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_u32() {
        assert_eq!(lenient_u32(Some("5")), 5);
        assert_eq!(lenient_u32(Some(" 12 ")), 12);
        assert_eq!(lenient_u32(Some("abc")), 0);
        assert_eq!(lenient_u32(Some("-3")), 0);
        assert_eq!(lenient_u32(Some("")), 0);
        assert_eq!(lenient_u32(None), 0);
    }

    #[test]
    fn test_keyword_defaults() {
        let request = SearchParams::default().into_request();
        assert_eq!(request.keyword, "mantle");

        let request = SearchParams {
            keyword: Some("   ".to_string()),
            ..Default::default()
        }
        .into_request();
        assert_eq!(request.keyword, "mantle");

        let request = SearchParams {
            keyword: Some("rust".to_string()),
            ..Default::default()
        }
        .into_request();
        assert_eq!(request.keyword, "rust");
    }

    #[test]
    fn test_into_request_filters_and_max_results() {
        let request = SearchParams {
            keyword: Some("mantle".to_string()),
            min_likes: Some("5".to_string()),
            min_retweets: Some("oops".to_string()),
            min_replies: None,
            max_results: Some("25".to_string()),
        }
        .into_request();

        assert_eq!(request.filters.min_likes, 5);
        assert_eq!(request.filters.min_retweets, 0);
        assert_eq!(request.filters.min_replies, 0);
        assert_eq!(request.max_results, Some(25));

        let request = SearchParams {
            max_results: Some("lots".to_string()),
            ..Default::default()
        }
        .into_request();
        assert_eq!(request.max_results, None);
    }
}
