use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

/// A single post as returned by the recent-search endpoint. Held in memory
/// for one render cycle, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<PublicMetrics>,
}

/// Wire shape of a successful recent-search response. `data` is omitted (or
/// null) when nothing matched; `meta` is kept opaque and passed through.
#[derive(Debug, Default, Deserialize)]
pub struct RecentSearchResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub meta: Value,
}

/// What the gateway hands back to the client for one search.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub tweets: Vec<Tweet>,
    pub meta: Value,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let body = serde_json::json!({
            "data": [
                {
                    "id": "1234",
                    "text": "hello mantle",
                    "created_at": "2024-05-01T12:00:00.000Z",
                    "author_id": "42",
                    "public_metrics": {
                        "like_count": 3,
                        "retweet_count": 1,
                        "reply_count": 0,
                        "quote_count": 9
                    }
                }
            ],
            "meta": { "newest_id": "1234", "result_count": 1 }
        });

        let parsed: RecentSearchResponse = serde_json::from_value(body).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].id, "1234");
        assert_eq!(data[0].public_metrics.as_ref().unwrap().like_count, 3);
        assert_eq!(parsed.meta["result_count"], 1);
    }

    #[test]
    fn test_deserialize_empty_response_defaults() {
        // No matches: the API drops `data` entirely and may drop `meta` too.
        let parsed: RecentSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_none());
        assert!(parsed.meta.is_null());

        let parsed: RecentSearchResponse =
            serde_json::from_str(r#"{"data":null,"meta":null}"#).unwrap();
        assert!(parsed.data.is_none());
        assert!(parsed.meta.is_null());
    }

    #[test]
    fn test_tweet_without_metrics() {
        let parsed: Tweet =
            serde_json::from_str(r#"{"id":"1","text":"no metrics attached"}"#).unwrap();
        assert!(parsed.public_metrics.is_none());

        // Absent metrics stay absent on the way out rather than becoming null.
        let out = serde_json::to_value(&parsed).unwrap();
        assert!(out.get("public_metrics").is_none());
    }
}
