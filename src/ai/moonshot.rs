//! Moonshot (Kimi) chat-completions provider.

use super::{
    calculate_backoff_delay, parse_retry_delay, AiError, AiErrorKind, ChatMessage, ChatResponse,
    HISTORY_WINDOW, MAX_RETRIES, MAX_TOKENS_CHAT, REQUEST_TIMEOUT_SECS,
};
use crate::ai::prompts::build_advisor_system_prompt;
use crate::models::MpfFund;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_URL: &str = "https://api.moonshot.cn/v1/chat/completions";

/// Default chat model
pub const DEFAULT_MODEL: &str = "moonshot-v1-8k";

const PROVIDER: &str = "Moonshot";

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Parse Moonshot API error response
fn parse_error(status: u16, body: &str, model: &str) -> AiError {
    let body_lower = body.to_lowercase();

    match status {
        429 => {
            if body_lower.contains("quota") || body_lower.contains("balance") {
                AiError::quota_exceeded(PROVIDER, model)
            } else {
                let retry_after = parse_retry_delay(body);
                AiError::rate_limit(PROVIDER, model, retry_after)
            }
        }
        401 => AiError::invalid_api_key(PROVIDER, model),
        403 => {
            if body_lower.contains("permission") || body_lower.contains("access") {
                AiError::invalid_api_key(PROVIDER, model)
            } else {
                AiError::other(PROVIDER, model, "Access denied")
            }
        }
        404 => AiError::model_not_found(PROVIDER, model),
        500..=599 => AiError::server_error(PROVIDER, model, &format!("HTTP {}", status)),
        _ => AiError::other(
            PROVIDER,
            model,
            &format!(
                "HTTP {}: {}",
                status,
                if body.len() > 200 { &body[..200] } else { body }
            ),
        ),
    }
}

/// Check if error is retryable
fn is_retryable(err: &AiError) -> bool {
    matches!(
        err.kind,
        AiErrorKind::RateLimit | AiErrorKind::ServerError | AiErrorKind::NetworkError
    )
}

/// Send a chat turn to the Moonshot API with retry logic.
///
/// The system prompt is rebuilt from the fund catalog on every call and the
/// history is truncated to the last [`HISTORY_WINDOW`] messages. An API key
/// is mandatory; there is deliberately no built-in fallback key.
pub async fn chat(
    model: &str,
    api_key: &str,
    history: &[ChatMessage],
    funds: &[MpfFund],
) -> Result<ChatResponse, AiError> {
    if api_key.trim().is_empty() {
        return Err(AiError::invalid_api_key(PROVIDER, model));
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| AiError::invalid_api_key(PROVIDER, model))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .pool_max_idle_per_host(2)
        .build()
        .map_err(|e| AiError::network_error(PROVIDER, model, &e.to_string()))?;

    // Build messages: system prompt first, then the trailing history window
    let mut messages = vec![ChatMessage {
        role: "system".to_string(),
        content: build_advisor_system_prompt(funds),
    }];
    let window_start = history.len().saturating_sub(HISTORY_WINDOW);
    messages.extend_from_slice(&history[window_start..]);

    let request_body = ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: 0.7,
        max_tokens: MAX_TOKENS_CHAT,
    };

    // Retry loop with exponential backoff
    let mut last_error = AiError::other(PROVIDER, model, "No attempts made");

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(calculate_backoff_delay(attempt - 1)).await;
        }

        log::debug!("Sending chat request to {} (attempt {})", API_URL, attempt + 1);

        let response = match client.post(API_URL).json(&request_body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                last_error = if e.is_timeout() {
                    AiError::network_error(PROVIDER, model, "Request timed out")
                } else if e.is_connect() {
                    AiError::network_error(PROVIDER, model, "Connection failed")
                } else {
                    AiError::network_error(PROVIDER, model, &e.to_string())
                };

                if attempt < MAX_RETRIES && is_retryable(&last_error) {
                    continue;
                }
                return Err(last_error);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            last_error = parse_error(status.as_u16(), &body, model);

            if attempt < MAX_RETRIES && is_retryable(&last_error) {
                continue;
            }
            return Err(last_error);
        }

        // Success - parse response
        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::other(PROVIDER, model, &format!("JSON parse error: {}", e)))?;

        let response_text = data
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        return Ok(ChatResponse {
            response: response_text,
            provider: PROVIDER.to_string(),
            model: model.to_string(),
            tokens_used: data.usage.map(|u| u.total_tokens),
        });
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_rate_limit() {
        let err = parse_error(429, "slow down, retry in 4 seconds", DEFAULT_MODEL);
        assert_eq!(err.kind, AiErrorKind::RateLimit);
        assert_eq!(err.retry_after_secs, Some(4));
    }

    #[test]
    fn test_parse_error_quota() {
        let err = parse_error(429, "insufficient balance for this account", DEFAULT_MODEL);
        assert_eq!(err.kind, AiErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_parse_error_invalid_key() {
        let err = parse_error(401, "invalid api key", DEFAULT_MODEL);
        assert_eq!(err.kind, AiErrorKind::InvalidApiKey);
    }

    #[test]
    fn test_parse_error_server() {
        let err = parse_error(503, "upstream unavailable", DEFAULT_MODEL);
        assert_eq!(err.kind, AiErrorKind::ServerError);
        assert!(is_retryable(&err));
    }

    #[test]
    fn test_parse_error_model_not_found() {
        let err = parse_error(404, "no such model", DEFAULT_MODEL);
        assert_eq!(err.kind, AiErrorKind::ModelNotFound);
        assert!(!is_retryable(&err));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_api_key() {
        let err = chat(DEFAULT_MODEL, "  ", &[], &[]).await.unwrap_err();
        assert_eq!(err.kind, AiErrorKind::InvalidApiKey);
    }
}
