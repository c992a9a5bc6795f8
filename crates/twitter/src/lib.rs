pub mod api;
pub mod logic;
pub mod query;
pub mod structs;

pub use api::{SearchError, TweetFetcher, TwitterClient};
pub use logic::{run_search, SearchRequest};
pub use query::{build_search_query, EngagementFilters};
pub use structs::{SearchOutcome, Tweet};
