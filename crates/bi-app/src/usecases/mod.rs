pub mod auth;
pub mod school_selection;
pub mod upload_flow;
