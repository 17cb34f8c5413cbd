//! Login and registration use cases.

mod login;
mod register;

pub use login::Login;
pub use register::Register;

use bi_core::auth::CredentialsError;
use bi_core::ports::{Alert, ApiError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] CredentialsError),
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Map a failed auth call onto the alert shown and the error returned.
fn failure(err: ApiError, failed_title: &str, default_detail: &str) -> (Alert, AuthError) {
    match err {
        ApiError::Http { detail, .. } => {
            let message = detail.unwrap_or_else(|| default_detail.to_string());
            (Alert::new(failed_title, message.clone()), AuthError::Rejected(message))
        }
        ApiError::Transport(reason) => (
            Alert::new(
                "Network Error",
                "Please check your internet connection and try again.",
            ),
            AuthError::Network(reason),
        ),
        ApiError::Decode(reason) => (
            Alert::error("Invalid response from server. Please try again."),
            AuthError::InvalidResponse(reason),
        ),
        other => (
            Alert::error("An unexpected error occurred. Please try again."),
            AuthError::Network(other.to_string()),
        ),
    }
}
