//! HTTP implementation of the backend ports.

mod auth_api;
mod client;
mod error;
mod school_api;

pub use client::HttpBackend;
pub use error::extract_error_detail;
