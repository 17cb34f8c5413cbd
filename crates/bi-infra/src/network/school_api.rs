use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info, warn};

use bi_core::auth::BearerToken;
use bi_core::ids::{ClassroomId, SubjectId};
use bi_core::ports::{ApiError, SchoolApiPort};
use bi_core::school::{Assignment, Classroom, Subject};
use bi_core::upload::{BulkUploadReceipt, BulkUploadRequest, UploadFile};

use super::client::HttpBackend;

#[async_trait]
impl SchoolApiPort for HttpBackend {
    async fn list_classrooms(&self, token: &BearerToken) -> Result<Vec<Classroom>, ApiError> {
        self.send_json(self.get(token, "/classrooms-by-teacher"))
            .await
    }

    async fn list_subjects(&self, token: &BearerToken) -> Result<Vec<Subject>, ApiError> {
        self.send_json(self.get(token, "/subjects-by-teacher")).await
    }

    async fn list_assignments(
        &self,
        token: &BearerToken,
        subject: SubjectId,
    ) -> Result<Vec<Assignment>, ApiError> {
        let path = format!("/assignments-by-subject/{subject}");
        self.send_json(self.get(token, &path)).await
    }

    async fn classroom_roster(
        &self,
        token: &BearerToken,
        classroom: ClassroomId,
    ) -> Result<Value, ApiError> {
        let path = format!("/classroom/{classroom}/students");
        self.send_json(self.get(token, &path)).await
    }

    async fn subject_detail(
        &self,
        token: &BearerToken,
        subject: SubjectId,
    ) -> Result<Value, ApiError> {
        let path = format!("/subject/{subject}");
        self.send_json(self.get(token, &path)).await
    }

    async fn bulk_upload(
        &self,
        token: &BearerToken,
        request: &BulkUploadRequest,
    ) -> Result<BulkUploadReceipt, ApiError> {
        let request_builder = self.post(token, "/bulk-upload");

        let mut form = Form::new()
            .text("assignment_id", request.assignment_id.to_string())
            .text("student_id", request.student_id.to_string());
        for file in &request.files {
            form = form.part("files", file_part(file).await?);
        }

        info!(
            assignment_id = %request.assignment_id,
            student_id = %request.student_id,
            files = request.files.len(),
            "posting bulk upload"
        );
        let body = self.send(request_builder.multipart(form)).await?;
        Ok(receipt_from_body(&body))
    }
}

/// Read whatever the upload endpoint reports on success.
///
/// The status alone decides success; an unexpected body only loses the
/// informational fields.
fn receipt_from_body(body: &str) -> BulkUploadReceipt {
    let fields = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => {
            if !body.trim().is_empty() {
                warn!(bytes = body.len(), "bulk upload succeeded with a non-JSON-object body");
            }
            return BulkUploadReceipt::default();
        }
    };

    let pdf_id = match fields.get("pdf_id") {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    if pdf_id.is_none() && fields.get("pdf_id").is_some_and(|v| !v.is_null()) {
        warn!(pdf_id = %fields["pdf_id"], "ignoring non-numeric pdf_id");
    }

    BulkUploadReceipt {
        success: fields.get("success").and_then(Value::as_bool),
        message: fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        pdf_id,
    }
}

/// Read one image into a multipart part.
async fn file_part(file: &UploadFile) -> Result<Part, ApiError> {
    let path = local_path(&file.source);
    let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::File {
        path: file.source.clone(),
        reason: e.to_string(),
    })?;
    debug!(filename = %file.filename, bytes = bytes.len(), "attaching image");
    Part::bytes(bytes)
        .file_name(file.filename.clone())
        .mime_str(file.mime)
        .map_err(|e| ApiError::File {
            path: file.source.clone(),
            reason: e.to_string(),
        })
}

/// Strip a `file://` scheme; anything else is taken as a plain path.
fn local_path(source: &str) -> &str {
    source.strip_prefix("file://").unwrap_or(source)
}
