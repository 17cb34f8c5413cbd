//! BrainInk Application Orchestration Layer
//!
//! This crate contains the use cases behind the login, role-selection and
//! assignment-upload screens. Hosts feed it user events and render the state
//! snapshots it returns.

pub mod session;
pub mod usecases;

pub use session::SessionStore;
pub use usecases::auth::{AuthError, Login, Register};
pub use usecases::school_selection::{SchoolSelectionError, SchoolSelectionOrchestrator};
pub use usecases::upload_flow::{UploadFlowError, UploadFlowOrchestrator, UploadScreen};
