//! Moonshot (Kimi) chat transport for the MPF advisor.
//!
//! Strictly upstream of the extraction engine: this module performs the
//! network I/O and hands back a plain reply string; everything that can
//! fail, time out or retry lives here and never inside extraction.

pub mod moonshot;
pub mod prompts;

use serde::{Deserialize, Serialize};

// ============================================================================
// Request Configuration Constants
// ============================================================================

/// Request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Maximum retries for transient errors
pub const MAX_RETRIES: u32 = 2;

/// Base delay for exponential backoff (milliseconds)
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Maximum tokens for chat responses
pub const MAX_TOKENS_CHAT: u32 = 1500;

/// Number of trailing history messages sent with each request
pub const HISTORY_WINDOW: usize = 6;

// ============================================================================
// Chat Types
// ============================================================================

/// One turn of the chat history ("user" or "assistant")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Reply from the chat provider
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: Option<u32>,
}

// ============================================================================
// Structured AI Errors
// ============================================================================

/// Types of AI API errors
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AiErrorKind {
    /// Rate limit exceeded - too many requests, retry after delay
    RateLimit,
    /// Quota/credits exhausted - need to upgrade plan
    QuotaExceeded,
    /// Invalid, missing or expired API key
    InvalidApiKey,
    /// Model not found or not available
    ModelNotFound,
    /// Server error on provider side
    ServerError,
    /// Network/connection error
    NetworkError,
    /// Other/unknown error
    Other,
}

/// Structured AI error with details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiError {
    pub kind: AiErrorKind,
    pub message: String,
    pub provider: String,
    pub model: String,
    /// Suggested retry delay in seconds (for rate limit errors)
    pub retry_after_secs: Option<u32>,
}

impl AiError {
    pub fn rate_limit(provider: &str, model: &str, retry_after: Option<u32>) -> Self {
        Self {
            kind: AiErrorKind::RateLimit,
            message: "Too many requests. Please wait a moment.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: retry_after,
        }
    }

    pub fn quota_exceeded(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::QuotaExceeded,
            message: "Quota exhausted. Please check your plan or billing.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: None,
        }
    }

    pub fn invalid_api_key(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::InvalidApiKey,
            message: "Invalid or missing API key. Please check your settings.".to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: None,
        }
    }

    pub fn model_not_found(provider: &str, model: &str) -> Self {
        Self {
            kind: AiErrorKind::ModelNotFound,
            message: format!("Model '{}' is not available.", model),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: None,
        }
    }

    pub fn server_error(provider: &str, model: &str, details: &str) -> Self {
        Self {
            kind: AiErrorKind::ServerError,
            message: format!("Server error at {}: {}", provider, details),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: Some(5),
        }
    }

    pub fn network_error(provider: &str, model: &str, details: &str) -> Self {
        Self {
            kind: AiErrorKind::NetworkError,
            message: format!("Network error: {}", details),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: None,
        }
    }

    pub fn other(provider: &str, model: &str, message: &str) -> Self {
        Self {
            kind: AiErrorKind::Other,
            message: message.to_string(),
            provider: provider.to_string(),
            model: model.to_string(),
            retry_after_secs: None,
        }
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.provider, self.model, self.message)
    }
}

impl std::error::Error for AiError {}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Parse retry delay from error response (supports "4s", "4.5s", seconds as number)
pub fn parse_retry_delay(text: &str) -> Option<u32> {
    // Try to find "retryDelay": "Xs" pattern
    if let Some(idx) = text.find("retryDelay") {
        let after = &text[idx..];
        for word in after.split_whitespace().take(5) {
            let clean = word.trim_matches(|c: char| !c.is_numeric() && c != '.');
            if let Ok(secs) = clean.parse::<f64>() {
                return Some(secs.ceil() as u32);
            }
        }
    }
    // Try to find "retry in X" pattern
    if let Some(idx) = text.find("retry in") {
        let after = &text[idx + 8..];
        for word in after.split_whitespace().take(3) {
            let clean = word.trim_matches(|c: char| !c.is_numeric() && c != '.');
            if let Ok(secs) = clean.parse::<f64>() {
                return Some(secs.ceil() as u32);
            }
        }
    }
    None
}

/// Calculate exponential backoff delay, capped at 10 seconds
pub fn calculate_backoff_delay(attempt: u32) -> std::time::Duration {
    let delay_ms = RETRY_BASE_DELAY_MS * 2u64.pow(attempt);
    std::time::Duration::from_millis(delay_ms.min(10_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_delay_retry_delay_format() {
        let text = r#"{"error": {"retryDelay": "4s"}}"#;
        assert_eq!(parse_retry_delay(text), Some(4));
    }

    #[test]
    fn test_parse_retry_delay_decimal() {
        let text = r#"retryDelay: 2.5s"#;
        assert_eq!(parse_retry_delay(text), Some(3)); // Ceiled
    }

    #[test]
    fn test_parse_retry_delay_retry_in_format() {
        let text = "Please retry in 10 seconds";
        assert_eq!(parse_retry_delay(text), Some(10));
    }

    #[test]
    fn test_parse_retry_delay_none() {
        let text = "Some error without delay info";
        assert_eq!(parse_retry_delay(text), None);
    }

    #[test]
    fn test_calculate_backoff_delay() {
        assert_eq!(calculate_backoff_delay(0), std::time::Duration::from_millis(1000));
        assert_eq!(calculate_backoff_delay(1), std::time::Duration::from_millis(2000));
        assert_eq!(calculate_backoff_delay(2), std::time::Duration::from_millis(4000));
        assert_eq!(calculate_backoff_delay(10), std::time::Duration::from_millis(10000)); // Capped at 10s
    }

    #[test]
    fn test_chat_message_constructors() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, "user");
        assert_eq!(ChatMessage::assistant("hi").role, "assistant");
    }
}
