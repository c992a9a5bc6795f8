use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use time::Duration;

pub const SESSION_COOKIE: &str = "session";

const SESSION_TTL_DAYS: i64 = 7;

/// Profile attributes taken from the identity provider at login. X does not
/// expose an email address through the v2 profile endpoint, so `email` stays
/// empty unless the provider ever supplies one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The session gate: returns the logged-in user when the request carries a
/// valid signed session cookie. Absent or tampered cookies yield None.
pub fn current_user(jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Builds the signed session cookie set after a successful login.
pub fn session_cookie(user: &SessionUser) -> Cookie<'static> {
    let value = serde_json::to_string(user).unwrap_or_default();
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(Duration::days(SESSION_TTL_DAYS));
    cookie
}

/// Cookie used to clear the session on logout. Path must match the one the
/// session cookie was set with.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn user() -> SessionUser {
        SessionUser {
            id: "42".to_string(),
            name: "Test User".to_string(),
            avatar: Some("https://example.com/avatar.png".to_string()),
            email: None,
        }
    }

    #[test]
    fn test_session_roundtrip() {
        let key = Key::generate();
        let jar = SignedCookieJar::new(key).add(session_cookie(&user()));

        let restored = current_user(&jar).expect("session should be readable");
        assert_eq!(restored, user());
    }

    #[test]
    fn test_no_cookie_means_no_session() {
        let jar = SignedCookieJar::new(Key::generate());
        assert!(current_user(&jar).is_none());
    }

    #[test]
    fn test_garbage_cookie_value_means_no_session() {
        let key = Key::generate();
        let jar = SignedCookieJar::new(key).add(Cookie::new(SESSION_COOKIE, "not json"));
        assert!(current_user(&jar).is_none());
    }
}
