use reqwest::StatusCode;
use serde_json::Value;

use bi_core::ports::ApiError;

/// Pull a human-readable message out of an error response body.
///
/// Looks at `detail`, then `message`, then falls back to the raw body.
/// A list-shaped `detail` (request validation errors) is joined on its `msg`
/// entries.
pub fn extract_error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };
    if let Some(detail) = json.get("detail").and_then(detail_text) {
        return Some(detail);
    }
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        if !message.trim().is_empty() {
            return Some(message.to_string());
        }
    }
    match json {
        Value::Object(ref map) if map.is_empty() => None,
        Value::Null => None,
        _ => Some(body.to_string()),
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

pub(crate) fn http_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::Http {
        status: status.as_u16(),
        detail: extract_error_detail(body),
    }
}

pub(crate) fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport("request timed out".to_string())
    } else if error.is_decode() {
        ApiError::Decode(error.to_string())
    } else {
        ApiError::Transport(error.to_string())
    }
}
