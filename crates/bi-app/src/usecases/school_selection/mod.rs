//! School & role selection use cases.
//!
//! This module exposes the role-selection orchestrator.

pub mod orchestrator;

pub use orchestrator::{SchoolSelectionError, SchoolSelectionOrchestrator};
