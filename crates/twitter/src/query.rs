/// Engagement thresholds applied to a search. Zero means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementFilters {
    pub min_likes: u32,
    pub min_retweets: u32,
    pub min_replies: u32,
}

impl EngagementFilters {
    pub fn is_empty(&self) -> bool {
        self.min_likes == 0 && self.min_retweets == 0 && self.min_replies == 0
    }
}

/// Builds the recent-search query string: the keyword matched as plain text,
/// @mention and #hashtag, with spam terms excluded, followed by one `min_*`
/// clause per positive threshold in the fixed order likes, retweets, replies.
///
/// The keyword is inserted verbatim. Parentheses or boolean operators inside
/// it will corrupt the query grammar; only transport-level URL encoding is
/// applied when the request is sent.
pub fn build_search_query(keyword: &str, filters: &EngagementFilters) -> String {
    let mut query = format!("({keyword} OR @{keyword} OR #{keyword}) -scam -giveaway");

    if filters.min_likes > 0 {
        query.push_str(&format!(" min_faves:{}", filters.min_likes));
    }
    if filters.min_retweets > 0 {
        query.push_str(&format!(" min_retweets:{}", filters.min_retweets));
    }
    if filters.min_replies > 0 {
        query.push_str(&format!(" min_replies:{}", filters.min_replies));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_no_min_clauses() {
        let query = build_search_query("mantle", &EngagementFilters::default());
        assert_eq!(query, "(mantle OR @mantle OR #mantle) -scam -giveaway");
        assert!(!query.contains("min_"));
    }

    #[test]
    fn test_fixed_prefix_for_any_keyword() {
        for keyword in ["rust", "ethereum", "じゃがいも"] {
            let query = build_search_query(keyword, &EngagementFilters::default());
            assert!(query.starts_with(&format!(
                "({keyword} OR @{keyword} OR #{keyword}) -scam -giveaway"
            )));
        }
    }

    #[test]
    fn test_single_filter_single_clause() {
        let query = build_search_query(
            "mantle",
            &EngagementFilters {
                min_likes: 5,
                ..Default::default()
            },
        );
        assert_eq!(
            query,
            "(mantle OR @mantle OR #mantle) -scam -giveaway min_faves:5"
        );

        let query = build_search_query(
            "mantle",
            &EngagementFilters {
                min_retweets: 7,
                ..Default::default()
            },
        );
        assert_eq!(
            query,
            "(mantle OR @mantle OR #mantle) -scam -giveaway min_retweets:7"
        );

        let query = build_search_query(
            "mantle",
            &EngagementFilters {
                min_replies: 2,
                ..Default::default()
            },
        );
        assert_eq!(
            query,
            "(mantle OR @mantle OR #mantle) -scam -giveaway min_replies:2"
        );
    }

    #[test]
    fn test_clause_order_likes_retweets_replies() {
        let query = build_search_query(
            "mantle",
            &EngagementFilters {
                min_likes: 1,
                min_retweets: 2,
                min_replies: 3,
            },
        );
        assert_eq!(
            query,
            "(mantle OR @mantle OR #mantle) -scam -giveaway min_faves:1 min_retweets:2 min_replies:3"
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(EngagementFilters::default().is_empty());
        assert!(!EngagementFilters {
            min_replies: 1,
            ..Default::default()
        }
        .is_empty());
    }
}
