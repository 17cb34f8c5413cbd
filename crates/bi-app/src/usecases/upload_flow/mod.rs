//! Assignment upload screen.
//!
//! The cascading selection (classroom → subject → assignment → student), the
//! dependency loader that refills each list when its parent changes, and the
//! bulk upload submitter.

mod context;
pub mod loader;
pub mod orchestrator;
pub mod submit;

pub use context::{LoadingFlags, UploadContext, UploadScreen};
pub use loader::DependencyLoader;
pub use orchestrator::UploadFlowOrchestrator;
pub use submit::{SubmitBulkUpload, UploadSummary};

use bi_core::ports::ApiError;
use bi_core::selection::SelectionStep;
use bi_core::upload::UploadBlocked;

/// Errors produced by the upload flow.
#[derive(Debug, thiserror::Error)]
pub enum UploadFlowError {
    #[error("Authentication token is required")]
    MissingToken,
    #[error("{0} selection is locked until the previous step is chosen")]
    StepLocked(SelectionStep),
    #[error("{step} {id} is not in the loaded list")]
    NotInList { step: SelectionStep, id: i64 },
    #[error(transparent)]
    Blocked(#[from] UploadBlocked),
    #[error("an upload is already in progress")]
    AlreadyInFlight,
    #[error(transparent)]
    Upload(ApiError),
}
