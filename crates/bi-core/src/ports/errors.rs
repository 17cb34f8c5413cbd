use thiserror::Error;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No bearer token. Raised before any request is built.
    #[error("Authentication token is required")]
    MissingToken,

    /// Non-success status. `detail` is the server's own error text, if any.
    #[error("{}", http_message(.status, .detail))]
    Http { status: u16, detail: Option<String> },

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid response from server: {0}")]
    Decode(String),

    #[error("failed to read {path}: {reason}")]
    File { path: String, reason: String },
}

fn http_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP {status}"),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error text of an HTTP failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
