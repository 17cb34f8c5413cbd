//! Bulk upload domain: pending images, submit preconditions and the request
//! handed to the backend.

mod pending;
mod request;

pub use pending::{AddImagesOutcome, PendingUpload, SubmitButton};
pub use request::{
    check_preconditions, derive_filename, mime_for, success_message, BulkUploadReceipt,
    BulkUploadRequest, UploadBlocked, UploadFile,
};
