use axum_extra::extract::cookie::Key;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweet_search::app;
use tweet_search::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // App-only bearer token for the search API. Refuse to start without it.
    let bearer_token = std::env::var("TWITTER_BEARER_TOKEN")
        .map_err(|_| anyhow::anyhow!("TWITTER_BEARER_TOKEN environment variable is not set"))?;

    let client_id = std::env::var("AUTH_TWITTER_ID").unwrap_or_default();
    let client_secret = std::env::var("AUTH_TWITTER_SECRET").unwrap_or_default();
    if client_id.is_empty() || client_secret.is_empty() {
        tracing::warn!(
            "AUTH_TWITTER_ID / AUTH_TWITTER_SECRET not set. Sign-in will fail until configured."
        );
    }

    let public_url =
        std::env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let api_base_url =
        std::env::var("TWITTER_API_URL").unwrap_or_else(|_| "https://api.twitter.com".to_string());
    let authorize_url = std::env::var("TWITTER_AUTHORIZE_URL")
        .unwrap_or_else(|_| "https://x.com/i/oauth2/authorize".to_string());

    let config = AppConfig {
        redirect_uri: format!("{}/oauth/callback", public_url),
        public_url,
        api_base_url: api_base_url.clone(),
        authorize_url,
        client_id,
        client_secret,
        bearer_token,
    };

    // One outbound attempt per request; the timeout bounds it.
    let http_client = reqwest::Client::builder()
        .user_agent("TweetSearch/1.0")
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("Failed to build HTTP client");

    let state = AppState {
        config,
        twitter: twitter::TwitterClient::new(http_client.clone(), api_base_url),
        http_client,
        key: Key::from(
            &std::env::var("COOKIE_SECRET")
                .unwrap_or_else(|_| "very-secret-key-that-is-at-least-64-bytes-long-for-security-reasons-please-change-me".to_string())
                .into_bytes(),
        ),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("tweet-search listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
