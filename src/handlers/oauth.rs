use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::Duration;

use crate::auth::{self, SessionUser};
use crate::state::SharedState;

const OAUTH_COOKIE: &str = "oauth_context";
const OAUTH_SCOPE: &str = "users.read tweet.read offline.access";

fn random_alphanumeric(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Starts the sign-in flow: generates state and PKCE verifier, stashes both
/// in a short-lived signed cookie and bounces the browser to the provider.
pub async fn login(State(state): State<SharedState>, jar: SignedCookieJar) -> impl IntoResponse {
    tracing::info!("Login requested");

    let oauth_state = random_alphanumeric(32);
    let code_verifier = random_alphanumeric(43);

    let mut hasher = Sha256::new();
    hasher.update(code_verifier.as_bytes());
    let code_challenge = URL_SAFE_NO_PAD.encode(hasher.finalize());

    let cookie_val = serde_json::json!({
        "state": oauth_state,
        "verifier": code_verifier,
    })
    .to_string();

    let mut cookie = Cookie::new(OAUTH_COOKIE, cookie_val);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::minutes(10));
    let jar = jar.add(cookie);

    let auth_url = format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}&code_challenge={}&code_challenge_method=S256",
        state.config.authorize_url,
        urlencoding::encode(&state.config.client_id),
        urlencoding::encode(&state.config.redirect_uri),
        urlencoding::encode(OAUTH_SCOPE),
        urlencoding::encode(&oauth_state),
        urlencoding::encode(&code_challenge),
    );

    (jar, Redirect::to(&auth_url))
}

#[derive(Deserialize, Debug)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct OauthContext {
    state: String,
    verifier: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UsersMeResponse {
    data: UserProfile,
}

#[derive(Deserialize)]
struct UserProfile {
    id: String,
    name: String,
    profile_image_url: Option<String>,
}

/// Finishes the sign-in flow: verifies the state parameter against the
/// signed cookie, exchanges the code for a user token and stores the profile
/// in the session cookie.
pub async fn callback(
    State(state): State<SharedState>,
    jar: SignedCookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(cookie) = jar.get(OAUTH_COOKIE) else {
        tracing::error!("Missing oauth_context cookie on callback");
        return (StatusCode::BAD_REQUEST, "Session expired, please retry login").into_response();
    };
    let context: OauthContext = match serde_json::from_str(cookie.value()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to parse oauth cookie: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid session data").into_response();
        }
    };

    // Spent either way; a stale context must not survive a failed attempt.
    let jar = jar.remove(removal_oauth_cookie());

    if let Some(error) = &params.error {
        let desc = params
            .error_description
            .as_deref()
            .unwrap_or("No description");
        tracing::error!("OAuth error from provider: {} - {}", error, desc);
        return (
            jar,
            (
                StatusCode::BAD_REQUEST,
                format!("Sign-in refused by provider: {}", error),
            ),
        )
            .into_response();
    }

    let (Some(code), Some(state_param)) = (&params.code, &params.state) else {
        return (jar, (StatusCode::BAD_REQUEST, "Missing code or state")).into_response();
    };

    if context.state != *state_param {
        tracing::error!("OAuth state mismatch");
        return (jar, (StatusCode::BAD_REQUEST, "Invalid state")).into_response();
    }

    // Exchange the code for a user access token.
    let token_endpoint = format!("{}/2/oauth2/token", state.config.api_base_url);
    let token_params = [
        ("grant_type", "authorization_code"),
        ("code", code.as_str()),
        ("redirect_uri", state.config.redirect_uri.as_str()),
        ("client_id", state.config.client_id.as_str()),
        ("code_verifier", context.verifier.as_str()),
    ];

    let token: TokenResponse = match state
        .http_client
        .post(&token_endpoint)
        .basic_auth(&state.config.client_id, Some(&state.config.client_secret))
        .form(&token_params)
        .send()
        .await
    {
        Ok(res) if res.status().is_success() => match res.json().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to parse token response: {}", e);
                return (jar, (StatusCode::BAD_GATEWAY, "Token exchange failed")).into_response();
            }
        },
        Ok(res) => {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Token exchange failed: {} - {}", status, body);
            return (jar, (StatusCode::BAD_GATEWAY, "Token exchange failed")).into_response();
        }
        Err(e) => {
            tracing::error!("Token exchange request failed: {}", e);
            return (jar, (StatusCode::BAD_GATEWAY, "Token exchange failed")).into_response();
        }
    };

    // Fetch the profile attributes the UI displays.
    let me_url = format!(
        "{}/2/users/me?user.fields=profile_image_url",
        state.config.api_base_url
    );
    let profile: UsersMeResponse = match state
        .http_client
        .get(&me_url)
        .header("Authorization", format!("Bearer {}", token.access_token))
        .send()
        .await
    {
        Ok(res) if res.status().is_success() => match res.json().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to parse profile response: {}", e);
                return (jar, (StatusCode::BAD_GATEWAY, "Profile lookup failed")).into_response();
            }
        },
        Ok(res) => {
            let status = res.status();
            tracing::error!("Profile lookup failed: {}", status);
            return (jar, (StatusCode::BAD_GATEWAY, "Profile lookup failed")).into_response();
        }
        Err(e) => {
            tracing::error!("Profile request failed: {}", e);
            return (jar, (StatusCode::BAD_GATEWAY, "Profile lookup failed")).into_response();
        }
    };

    let user = SessionUser {
        id: profile.data.id,
        name: profile.data.name,
        avatar: profile.data.profile_image_url,
        email: None,
    };
    tracing::info!("Login successful for user id {}", user.id);

    let jar = jar.add(auth::session_cookie(&user));
    (jar, Redirect::to("/tweets")).into_response()
}

pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    let jar = jar.remove(auth::removal_cookie());
    (jar, Redirect::to("/"))
}

fn removal_oauth_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(OAUTH_COOKIE, "");
    cookie.set_path("/");
    cookie
}
