pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{routing::get, Router};
use state::SharedState;
use tower_http::trace::TraceLayer;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/health", get(handlers::common::health))
        .route("/login", get(handlers::oauth::login))
        .route("/oauth/callback", get(handlers::oauth::callback))
        .route("/logout", get(handlers::oauth::logout))
        .route("/tweets", get(handlers::pages::tweets_page))
        .route("/api/tweets/search", get(handlers::search::search_tweets))
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any) // In production, specific origin should be used
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
