//! # bi-core
//!
//! Core domain models and business logic for the BrainInk teacher client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod config;
pub mod ids;
pub mod ports;
pub mod role_selection;
pub mod roster;
pub mod school;
pub mod selection;
pub mod upload;

// Re-export commonly used types at the crate root
pub use auth::{BearerToken, Role, User};
pub use config::AppConfig;
pub use ids::{AssignmentId, ClassroomId, SchoolId, StudentId, SubjectId, UserId};
pub use school::{Assignment, Classroom, School, SchoolSelectionReceipt, Student, Subject};
pub use selection::{Selection, SelectionPhase, SelectionStep};
