use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, TimeZone};
use serde_json::{json, Value};
use tracing::{error, warn};

/// Failures crossing the handler boundary. Every variant renders as a JSON
/// body the UI can display; upstream detail is passed through, internal
/// causes are logged and hidden.
#[derive(Debug)]
pub enum AppError {
    Auth,
    RateLimited { reset: Option<i64>, detail: Value },
    Upstream { status: u16, detail: Value },
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            AppError::RateLimited { reset, detail } => {
                let reset_at = reset
                    .and_then(format_reset)
                    .unwrap_or_else(|| "unknown".to_string());
                warn!("Twitter API rate limited, reset at {}", reset_at);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "Twitter API error",
                        "message": format!("Rate limit exceeded. Try again after {}.", reset_at),
                        "details": detail,
                    })),
                )
                    .into_response()
            }
            AppError::Upstream { status, detail } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                warn!("Twitter API error: status={}", status);
                (
                    status,
                    Json(json!({ "error": "Twitter API error", "details": detail })),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                error!("Error fetching tweets: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch tweets" })),
                )
                    .into_response()
            }
        }
    }
}

/// Local wall-clock rendering of the rate-limit reset timestamp, for the
/// user-facing retry message.
fn format_reset(unix_secs: i64) -> Option<String> {
    Local
        .timestamp_opt(unix_secs, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

impl From<twitter::SearchError> for AppError {
    fn from(err: twitter::SearchError) -> Self {
        match err {
            twitter::SearchError::RateLimited { reset, detail } => {
                AppError::RateLimited { reset, detail }
            }
            twitter::SearchError::Upstream { status, detail } => {
                AppError::Upstream { status, detail }
            }
            twitter::SearchError::Transport(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reset_renders_local_datetime() {
        // 2023-11-14T22:13:20Z; any local offset stays inside 2023-11-14/15.
        let formatted = format_reset(1_700_000_000).unwrap();
        assert!(formatted.starts_with("2023-11-1"), "got {}", formatted);
    }

    #[tokio::test]
    async fn test_rate_limited_body_shape() {
        let response = AppError::RateLimited {
            reset: None,
            detail: json!({ "title": "Too Many Requests" }),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Twitter API error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Try again after unknown"));
        assert_eq!(body["details"]["title"], "Too Many Requests");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response =
            AppError::Internal(anyhow::anyhow!("connection reset by peer")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Failed to fetch tweets" }));
    }
}
