use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, StudentId};
use crate::school::{Assignment, Student};

use super::pending::PendingUpload;

/// Why a submit was refused before any request was made.
///
/// Checked in declaration order; the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadBlocked {
    #[error("Please select files to upload")]
    NoImages,
    #[error("Please select a student")]
    NoStudent,
    #[error("Assignment not found")]
    AssignmentNotFound,
}

/// One image part of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Local path or `file://` URI.
    pub source: String,
    pub filename: String,
    pub mime: &'static str,
}

/// The `POST /bulk-upload` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUploadRequest {
    pub assignment_id: AssignmentId,
    pub student_id: StudentId,
    pub files: Vec<UploadFile>,
}

impl BulkUploadRequest {
    pub fn new(assignment_id: AssignmentId, student_id: StudentId, images: &[String]) -> Self {
        let files = images
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let filename = derive_filename(source, index);
                UploadFile {
                    mime: mime_for(&filename),
                    source: source.clone(),
                    filename,
                }
            })
            .collect();
        Self {
            assignment_id,
            student_id,
            files,
        }
    }
}

/// Success body of `POST /bulk-upload`. Every field is optional because the
/// backend's success payload is informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadReceipt {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pdf_id: Option<i64>,
}

/// Run the submit preconditions in order.
///
/// `assignment` is the assignment resolved from the loaded list, not merely the
/// selected id.
pub fn check_preconditions<'a>(
    pending: &PendingUpload,
    student: Option<StudentId>,
    assignment: Option<&'a Assignment>,
) -> Result<(StudentId, &'a Assignment), UploadBlocked> {
    if pending.is_empty() {
        return Err(UploadBlocked::NoImages);
    }
    let student = student.ok_or(UploadBlocked::NoStudent)?;
    let assignment = assignment.ok_or(UploadBlocked::AssignmentNotFound)?;
    Ok((student, assignment))
}

/// Last path segment of the image source, or `image_{index}.jpg`.
pub fn derive_filename(source: &str, index: usize) -> String {
    let trimmed = source.split(['?', '#']).next().unwrap_or("");
    match trimmed.rsplit(['/', '\\']).next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => format!("image_{index}.jpg"),
    }
}

pub fn mime_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}

pub fn success_message(file_count: usize, student: Option<&Student>, assignment: &Assignment) -> String {
    let student_name = student
        .map(Student::full_name)
        .unwrap_or_else(|| "the selected student".to_string());
    format!(
        "Successfully uploaded {file_count} files for {student_name} - {}",
        assignment.title
    )
}
