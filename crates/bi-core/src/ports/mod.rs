//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The use cases depend only on these
//! traits; the HTTP adapter and the shell's alert presenter implement them.

mod alert;
mod auth_api;
pub mod errors;
mod school_api;

pub use alert::{Alert, AlertPort};
pub use auth_api::AuthApiPort;
pub use errors::ApiError;
pub use school_api::SchoolApiPort;
