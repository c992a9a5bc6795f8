use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

/// Process-wide configuration, loaded once at startup and injected into the
/// handlers through [`AppState`]. The bearer token and OAuth client secret
/// must never appear in logs or responses.
#[derive(Clone)]
pub struct AppConfig {
    pub public_url: String,
    pub api_base_url: String,
    pub authorize_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub bearer_token: String,
    pub redirect_uri: String,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
    pub twitter: twitter::TwitterClient,
    pub key: Key,
}

// Lets SignedCookieJar pull its signing key straight out of the app state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
