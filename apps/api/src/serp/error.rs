use std::time::Duration;

use thiserror::Error;

/// Failures talking to a SERP provider, classified from structured HTTP-layer
/// information (reqwest error kinds and status codes), never from message text.
#[derive(Debug, Error)]
pub enum SerpError {
    #[error("SERP provider credentials are not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("SERP request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Rate limited by SERP provider")]
    RateLimited,

    #[error("SERP provider rejected credentials (status {status})")]
    Auth { status: u16 },

    #[error("SERP API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse SERP response: {0}")]
    Parse(String),
}

const MAX_DIAGNOSTIC_LEN: usize = 300;

impl SerpError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            SerpError::Timeout(timeout)
        } else if let Some(status) = err.status() {
            SerpError::from_status(status.as_u16(), String::new())
        } else if err.is_decode() {
            SerpError::Parse(err.to_string())
        } else {
            SerpError::Network(err.to_string())
        }
    }

    /// Maps a non-2xx status and its body.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => SerpError::RateLimited,
            401 | 403 => SerpError::Auth { status },
            _ => SerpError::Api {
                status,
                message: diagnostic_message(&body),
            },
        }
    }

    /// Short machine-readable reason for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            SerpError::NotConfigured => "not_configured",
            SerpError::Network(_) => "network",
            SerpError::Timeout(_) => "timeout",
            SerpError::RateLimited => "rate_limited",
            SerpError::Auth { .. } => "auth",
            SerpError::Api { .. } => "api",
            SerpError::Parse(_) => "parse",
        }
    }

    /// A message worth showing to the user, for failures they can act on.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            SerpError::RateLimited => Some(
                "The search data provider is rate limiting requests. Please wait a moment and retry.",
            ),
            SerpError::Auth { .. } => Some(
                "The search data provider rejected our credentials. Please check the SERP API configuration.",
            ),
            _ => None,
        }
    }
}

/// Compact JSON when the body is JSON, the trimmed text otherwise, a generic
/// message when empty.
fn diagnostic_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "Unknown SERP API error".to_string();
    }
    let message = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|v| serde_json::to_string(&v).ok())
        .unwrap_or_else(|| trimmed.to_string());
    message.chars().take(MAX_DIAGNOSTIC_LEN).collect()
}
