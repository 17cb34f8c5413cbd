//! Dependency loader.
//!
//! Fetches the option list for one selection step. A failed fetch is reported
//! to the user and yields an empty list; it never aborts the flow.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use bi_core::auth::BearerToken;
use bi_core::ids::{ClassroomId, SubjectId};
use bi_core::ports::{Alert, AlertPort, SchoolApiPort};
use bi_core::roster::{normalize_roster, roster_from_subject, NormalizedRoster, RosterShape};
use bi_core::school::{Assignment, Classroom, Student, Subject};

pub struct DependencyLoader {
    api: Arc<dyn SchoolApiPort>,
    alerts: Arc<dyn AlertPort>,
}

impl DependencyLoader {
    pub fn new(api: Arc<dyn SchoolApiPort>, alerts: Arc<dyn AlertPort>) -> Self {
        Self { api, alerts }
    }

    pub async fn classrooms(&self, token: &BearerToken) -> Vec<Classroom> {
        match self.api.list_classrooms(token).await {
            Ok(classrooms) => {
                info!(count = classrooms.len(), "classrooms loaded");
                classrooms
            }
            Err(err) => {
                error!(error = %err, "failed to load classrooms");
                self.alerts
                    .show(Alert::error("Failed to load classrooms"))
                    .await;
                Vec::new()
            }
        }
    }

    pub async fn subjects(&self, token: &BearerToken) -> Vec<Subject> {
        match self.api.list_subjects(token).await {
            Ok(subjects) => {
                info!(count = subjects.len(), "subjects loaded");
                subjects
            }
            Err(err) => {
                error!(error = %err, "failed to load subjects");
                self.alerts.show(Alert::error("Failed to load subjects")).await;
                Vec::new()
            }
        }
    }

    pub async fn assignments(&self, token: &BearerToken, subject: SubjectId) -> Vec<Assignment> {
        match self.api.list_assignments(token, subject).await {
            Ok(assignments) => {
                info!(subject_id = %subject, count = assignments.len(), "assignments loaded");
                assignments
            }
            Err(err) => {
                error!(subject_id = %subject, error = %err, "failed to load assignments");
                self.alerts
                    .show(Alert::error("Failed to load assignments"))
                    .await;
                Vec::new()
            }
        }
    }

    /// Load the students for a classroom/subject pair.
    ///
    /// The classroom roster is tried first. If that request fails for any
    /// reason the subject's nested roster is tried exactly once.
    pub async fn roster(
        &self,
        token: &BearerToken,
        classroom: Option<ClassroomId>,
        subject: SubjectId,
    ) -> Vec<Student> {
        if let Some(classroom) = classroom {
            match self.api.classroom_roster(token, classroom).await {
                Ok(raw) => {
                    let roster = normalize_roster(&raw, Some(classroom));
                    return report("classroom", roster);
                }
                Err(err) => {
                    warn!(
                        classroom_id = %classroom,
                        error = %err,
                        "classroom roster unavailable, falling back to subject roster"
                    );
                }
            }
        }

        match self.api.subject_detail(token, subject).await {
            Ok(raw) => report("subject", roster_from_subject(&raw)),
            Err(err) => {
                error!(subject_id = %subject, error = %err, "failed to load subject roster");
                self.alerts
                    .show(Alert::error("Failed to load students from subject"))
                    .await;
                Vec::new()
            }
        }
    }
}

fn report(source: &'static str, roster: NormalizedRoster) -> Vec<Student> {
    if roster.shape == RosterShape::Unrecognized {
        warn!(source, "unrecognized roster shape, treating as empty");
    } else {
        debug!(source, shape = ?roster.shape, "roster shape recognized");
    }
    if roster.unidentified > 0 {
        warn!(source, unidentified = roster.unidentified, "roster records without an id cannot be selected");
    }
    info!(source, count = roster.students.len(), "roster loaded");
    roster.students
}
