//! Shared fakes for the bi-app integration tests.
#![allow(dead_code)]

pub mod auth_mock;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use bi_core::auth::BearerToken;
use bi_core::ids::{ClassroomId, SubjectId};
use bi_core::ports::{Alert, AlertPort, ApiError, SchoolApiPort};
use bi_core::school::{Assignment, Classroom, Subject};
use bi_core::upload::{BulkUploadReceipt, BulkUploadRequest};

/// Collects every alert instead of showing it.
#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn all(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Alert> {
        self.alerts.lock().unwrap().last().cloned()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|alert| alert.message).collect()
    }
}

#[async_trait]
impl AlertPort for RecordingAlerts {
    async fn show(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// In-memory school API that records each call in order.
pub struct FakeSchoolApi {
    pub classrooms: Mutex<Result<Vec<Classroom>, ApiError>>,
    pub subjects: Mutex<Result<Vec<Subject>, ApiError>>,
    pub assignments: Mutex<HashMap<i64, Vec<Assignment>>>,
    pub classroom_roster: Mutex<Result<Value, ApiError>>,
    pub subject_detail: Mutex<Result<Value, ApiError>>,
    pub upload_result: Mutex<Result<BulkUploadReceipt, ApiError>>,
    pub uploads: Mutex<Vec<BulkUploadRequest>>,
    /// When set, `bulk_upload` parks until the gate is notified.
    pub upload_gate: Mutex<Option<Arc<Notify>>>,
    /// Notified once an upload request has been recorded.
    pub upload_started: Notify,
    calls: Mutex<Vec<String>>,
}

impl FakeSchoolApi {
    /// Classroom 101, subject 7, assignment 9 and student 55.
    pub fn seeded() -> Self {
        let mut assignments = HashMap::new();
        assignments.insert(7, vec![assignment(9, 7, "Essay 1"), assignment(10, 7, "Essay 2")]);
        assignments.insert(8, vec![assignment(11, 8, "Lab report")]);
        Self {
            classrooms: Mutex::new(Ok(vec![classroom(101, "5A"), classroom(102, "5B")])),
            subjects: Mutex::new(Ok(vec![subject(7, "English"), subject(8, "Science")])),
            assignments: Mutex::new(assignments),
            classroom_roster: Mutex::new(Ok(json!([
                {"id": 55, "fname": "Ada", "lname": "Lovelace", "username": "ada"},
                {"id": 56, "fname": "Alan", "lname": "Turing", "username": "alan"}
            ]))),
            subject_detail: Mutex::new(Ok(json!({"id": 7, "students": []}))),
            upload_result: Mutex::new(Ok(BulkUploadReceipt {
                success: Some(true),
                message: Some("Files uploaded".into()),
                pdf_id: Some(300),
            })),
            uploads: Mutex::new(Vec::new()),
            upload_gate: Mutex::new(None),
            upload_started: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Hold every upload until the returned gate is notified.
    pub fn gated(self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        *self.upload_gate.lock().unwrap() = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl SchoolApiPort for FakeSchoolApi {
    async fn list_classrooms(&self, _token: &BearerToken) -> Result<Vec<Classroom>, ApiError> {
        self.record("GET /classrooms-by-teacher");
        self.classrooms.lock().unwrap().clone()
    }

    async fn list_subjects(&self, _token: &BearerToken) -> Result<Vec<Subject>, ApiError> {
        self.record("GET /subjects-by-teacher");
        self.subjects.lock().unwrap().clone()
    }

    async fn list_assignments(
        &self,
        _token: &BearerToken,
        subject: SubjectId,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.record(format!("GET /assignments-by-subject/{subject}"));
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .get(&subject.value())
            .cloned()
            .unwrap_or_default())
    }

    async fn classroom_roster(
        &self,
        _token: &BearerToken,
        classroom: ClassroomId,
    ) -> Result<Value, ApiError> {
        self.record(format!("GET /classroom/{classroom}/students"));
        self.classroom_roster.lock().unwrap().clone()
    }

    async fn subject_detail(&self, _token: &BearerToken, subject: SubjectId) -> Result<Value, ApiError> {
        self.record(format!("GET /subject/{subject}"));
        self.subject_detail.lock().unwrap().clone()
    }

    async fn bulk_upload(
        &self,
        _token: &BearerToken,
        request: &BulkUploadRequest,
    ) -> Result<BulkUploadReceipt, ApiError> {
        self.record("POST /bulk-upload");
        self.uploads.lock().unwrap().push(request.clone());
        let gate = self.upload_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            self.upload_started.notify_one();
            gate.notified().await;
        }
        self.upload_result.lock().unwrap().clone()
    }
}

pub fn classroom(id: i64, name: &str) -> Classroom {
    serde_json::from_value(json!({"id": id, "name": name, "school_id": 1})).unwrap()
}

pub fn subject(id: i64, name: &str) -> Subject {
    serde_json::from_value(json!({"id": id, "name": name, "school_id": 1})).unwrap()
}

pub fn assignment(id: i64, subject_id: i64, title: &str) -> Assignment {
    serde_json::from_value(json!({"id": id, "title": title, "subject_id": subject_id})).unwrap()
}
