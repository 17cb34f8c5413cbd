//! # bi-infra
//!
//! Infrastructure adapters for the BrainInk teacher client.
//!
//! Implements the backend ports defined in `bi-core` over HTTPS.

pub mod network;

pub use network::HttpBackend;
