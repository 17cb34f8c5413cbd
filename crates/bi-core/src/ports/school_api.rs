use async_trait::async_trait;
use serde_json::Value;

use crate::auth::BearerToken;
use crate::ids::{ClassroomId, SubjectId};
use crate::school::{Assignment, Classroom, Subject};
use crate::upload::{BulkUploadReceipt, BulkUploadRequest};

use super::errors::ApiError;

/// Teacher-facing academic endpoints.
///
/// Roster calls return the raw body; shape handling belongs to
/// [`crate::roster`].
#[async_trait]
pub trait SchoolApiPort: Send + Sync {
    /// `GET /classrooms-by-teacher`
    async fn list_classrooms(&self, token: &BearerToken) -> Result<Vec<Classroom>, ApiError>;

    /// `GET /subjects-by-teacher`
    async fn list_subjects(&self, token: &BearerToken) -> Result<Vec<Subject>, ApiError>;

    /// `GET /assignments-by-subject/{id}`
    async fn list_assignments(
        &self,
        token: &BearerToken,
        subject: SubjectId,
    ) -> Result<Vec<Assignment>, ApiError>;

    /// `GET /classroom/{id}/students`
    async fn classroom_roster(
        &self,
        token: &BearerToken,
        classroom: ClassroomId,
    ) -> Result<Value, ApiError>;

    /// `GET /subject/{id}`, a subject with a nested `students` array.
    async fn subject_detail(&self, token: &BearerToken, subject: SubjectId)
        -> Result<Value, ApiError>;

    /// `POST /bulk-upload`
    async fn bulk_upload(
        &self,
        token: &BearerToken,
        request: &BulkUploadRequest,
    ) -> Result<BulkUploadReceipt, ApiError>;
}
