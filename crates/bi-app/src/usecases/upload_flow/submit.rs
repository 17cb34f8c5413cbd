//! Bulk upload submitter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use bi_core::auth::BearerToken;
use bi_core::ports::{Alert, AlertPort, SchoolApiPort};
use bi_core::upload::{check_preconditions, success_message, BulkUploadReceipt, BulkUploadRequest};

use super::context::UploadContext;
use super::UploadFlowError;

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSummary {
    pub files: usize,
    pub message: String,
    pub receipt: BulkUploadReceipt,
}

/// Submits the pending images for the selected assignment and student.
///
/// At most one submit runs at a time.
pub struct SubmitBulkUpload {
    api: Arc<dyn SchoolApiPort>,
    alerts: Arc<dyn AlertPort>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmitBulkUpload {
    pub fn new(api: Arc<dyn SchoolApiPort>, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            api,
            alerts,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn execute(
        &self,
        context: &UploadContext,
        token: Option<BearerToken>,
    ) -> Result<UploadSummary, UploadFlowError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("submit ignored, upload already in flight");
            return Err(UploadFlowError::AlreadyInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let screen = context.snapshot().await;
        let checked = check_preconditions(
            &screen.pending,
            screen.selection.student(),
            screen.selected_assignment(),
        );
        let (student_id, assignment) = match checked {
            Ok(checked) => checked,
            Err(blocked) => {
                info!(reason = %blocked, "submit blocked");
                self.alerts.show(Alert::error(blocked.to_string())).await;
                return Err(blocked.into());
            }
        };

        let Some(token) = token else {
            self.alerts
                .show(Alert::error("Authentication required"))
                .await;
            return Err(UploadFlowError::MissingToken);
        };

        let request = BulkUploadRequest::new(assignment.id, student_id, screen.pending.images());
        let files = request.files.len();
        context.update(|screen| screen.uploading = true).await;

        let span = info_span!(
            "usecase.bulk_upload.execute",
            assignment_id = %request.assignment_id,
            student_id = %request.student_id,
            files
        );
        let result = self.api.bulk_upload(&token, &request).instrument(span).await;
        context.update(|screen| screen.uploading = false).await;

        match result {
            Ok(receipt) => {
                let message = success_message(files, screen.selected_student(), assignment);
                info!(files, pdf_id = ?receipt.pdf_id, "bulk upload succeeded");
                let sent = screen.pending.images();
                context.update(|current| current.pending.complete(sent)).await;
                self.alerts.show(Alert::new("Success", message.clone())).await;
                Ok(UploadSummary {
                    files,
                    message,
                    receipt,
                })
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "bulk upload failed");
                self.alerts.show(Alert::error(err.to_string())).await;
                Err(UploadFlowError::Upload(err))
            }
        }
    }
}
