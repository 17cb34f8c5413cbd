//! Upload flow orchestrator.
//!
//! Feeds selection events through [`SelectionStateMachine`], applies the list
//! clears it asks for, and runs the loads against the dependency loader.
//! Loads for one dispatch run before the next dispatch starts, and a result is
//! kept only if the parent it was requested for is still selected.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use bi_core::auth::BearerToken;
use bi_core::ids::{AssignmentId, ClassroomId, StudentId, SubjectId};
use bi_core::ports::{Alert, AlertPort, SchoolApiPort};
use bi_core::selection::{SelectionAction, SelectionEvent, SelectionStateMachine, SelectionStep};

use crate::session::SessionStore;

use super::context::{UploadContext, UploadScreen};
use super::loader::DependencyLoader;
use super::submit::{SubmitBulkUpload, UploadSummary};
use super::UploadFlowError;

pub struct UploadFlowOrchestrator {
    context: UploadContext,
    loader: DependencyLoader,
    submitter: SubmitBulkUpload,
    session: SessionStore,
    alerts: Arc<dyn AlertPort>,
    selection_limit: usize,
}

impl UploadFlowOrchestrator {
    pub fn new(
        api: Arc<dyn SchoolApiPort>,
        alerts: Arc<dyn AlertPort>,
        session: SessionStore,
        selection_limit: usize,
    ) -> Self {
        Self {
            context: UploadContext::new(),
            loader: DependencyLoader::new(api.clone(), alerts.clone()),
            submitter: SubmitBulkUpload::new(api, alerts.clone()),
            session,
            alerts,
            selection_limit,
        }
    }

    /// Mount the screen: load the teacher's classrooms.
    pub async fn open(&self) -> Result<UploadScreen, UploadFlowError> {
        self.dispatch(SelectionEvent::Open).await
    }

    pub async fn pick_classroom(&self, id: ClassroomId) -> Result<UploadScreen, UploadFlowError> {
        self.ensure_offered(SelectionStep::Classroom, id.value()).await?;
        self.dispatch(SelectionEvent::PickClassroom(id)).await
    }

    pub async fn pick_subject(&self, id: SubjectId) -> Result<UploadScreen, UploadFlowError> {
        self.ensure_offered(SelectionStep::Subject, id.value()).await?;
        self.dispatch(SelectionEvent::PickSubject(id)).await
    }

    pub async fn pick_assignment(&self, id: AssignmentId) -> Result<UploadScreen, UploadFlowError> {
        self.ensure_offered(SelectionStep::Assignment, id.value()).await?;
        self.dispatch(SelectionEvent::PickAssignment(id)).await
    }

    pub async fn pick_student(&self, id: StudentId) -> Result<UploadScreen, UploadFlowError> {
        self.ensure_offered(SelectionStep::Student, id.value()).await?;
        self.dispatch(SelectionEvent::PickStudent(id)).await
    }

    /// Clear `step` and everything after it.
    pub async fn reopen(&self, step: SelectionStep) -> Result<UploadScreen, UploadFlowError> {
        self.dispatch(SelectionEvent::Reopen(step)).await
    }

    /// Append one picker batch to the pending images.
    pub async fn add_images(&self, batch: Vec<String>) -> UploadScreen {
        if batch.is_empty() {
            debug!("image picker cancelled");
            return self.screen().await;
        }
        let limit = self.selection_limit;
        let outcome = self
            .context
            .update(|screen| screen.pending.add_batch(batch, limit))
            .await;
        info!(
            added = outcome.added,
            skipped = outcome.skipped,
            total = outcome.total,
            "images added"
        );
        self.alerts
            .show(Alert::new("Images Added", outcome.message()))
            .await;
        self.screen().await
    }

    pub async fn remove_image(&self, index: usize) -> UploadScreen {
        let removed = self
            .context
            .update(|screen| screen.pending.remove(index))
            .await;
        if removed.is_none() {
            debug!(index, "no pending image at index");
        }
        self.screen().await
    }

    pub async fn set_description(&self, description: String) -> UploadScreen {
        self.context
            .update(|screen| screen.pending.set_description(description))
            .await;
        self.screen().await
    }

    pub async fn submit(&self) -> Result<UploadSummary, UploadFlowError> {
        let token = self.session.token().await;
        self.submitter.execute(&self.context, token).await
    }

    pub async fn screen(&self) -> UploadScreen {
        let mut screen = self.context.snapshot().await;
        screen.uploading |= self.submitter.is_in_flight();
        screen
    }

    async fn ensure_offered(&self, step: SelectionStep, id: i64) -> Result<(), UploadFlowError> {
        let screen = self.context.snapshot().await;
        if !screen.selection.is_unlocked(step) {
            return Err(UploadFlowError::StepLocked(step));
        }
        if !screen.offers(step, id) {
            return Err(UploadFlowError::NotInList { step, id });
        }
        Ok(())
    }

    async fn dispatch(&self, event: SelectionEvent) -> Result<UploadScreen, UploadFlowError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.upload_flow.dispatch", event = ?event);
        async {
            let current = self.context.selection().await;
            let (next, actions) = SelectionStateMachine::transition(current, event);

            let needs_backend = actions
                .iter()
                .any(|action| !matches!(action, SelectionAction::ClearList(_)));
            let token = if needs_backend {
                Some(
                    self.session
                        .token()
                        .await
                        .ok_or(UploadFlowError::MissingToken)?,
                )
            } else {
                None
            };

            if next != current {
                info!(from = ?current.phase(), to = ?next.phase(), "selection changed");
            }
            self.context
                .update(|screen| {
                    screen.selection = next;
                    for action in &actions {
                        if let SelectionAction::ClearList(step) = action {
                            screen.clear_list(*step);
                        }
                    }
                })
                .await;

            if let Some(token) = token {
                for action in actions {
                    self.execute_load(&token, action).await;
                }
            }
            Ok::<_, UploadFlowError>(self.screen().await)
        }
        .instrument(span)
        .await
    }

    async fn execute_load(&self, token: &BearerToken, action: SelectionAction) {
        debug!(?action, "upload flow executing action");
        match action {
            SelectionAction::ClearList(_) => {}
            SelectionAction::LoadClassrooms => {
                self.set_loading(SelectionStep::Classroom, true).await;
                let classrooms = self.loader.classrooms(token).await;
                self.context
                    .update(|screen| {
                        screen.loading.classrooms = false;
                        screen.classrooms = classrooms;
                    })
                    .await;
            }
            SelectionAction::LoadSubjects => {
                let requested = self.context.selection().await.classroom();
                self.set_loading(SelectionStep::Subject, true).await;
                let subjects = self.loader.subjects(token).await;
                self.context
                    .update(|screen| {
                        screen.loading.subjects = false;
                        if screen.selection.classroom() == requested {
                            screen.subjects = subjects;
                        } else {
                            debug!("discarding subjects loaded for a stale classroom");
                        }
                    })
                    .await;
            }
            SelectionAction::LoadAssignments { subject } => {
                self.set_loading(SelectionStep::Assignment, true).await;
                let assignments = self.loader.assignments(token, subject).await;
                self.context
                    .update(|screen| {
                        screen.loading.assignments = false;
                        if screen.selection.subject() == Some(subject) {
                            screen.assignments = assignments;
                        } else {
                            debug!(subject_id = %subject, "discarding assignments for a stale subject");
                        }
                    })
                    .await;
            }
            SelectionAction::LoadRoster { classroom, subject } => {
                self.set_loading(SelectionStep::Student, true).await;
                let students = self.loader.roster(token, classroom, subject).await;
                self.context
                    .update(|screen| {
                        screen.loading.students = false;
                        let current = screen.selection;
                        if current.subject() == Some(subject)
                            && (classroom.is_none() || current.classroom() == classroom)
                        {
                            screen.students = students;
                        } else {
                            debug!(subject_id = %subject, "discarding roster for a stale selection");
                        }
                    })
                    .await;
            }
        }
    }

    async fn set_loading(&self, step: SelectionStep, loading: bool) {
        self.context
            .update(|screen| screen.loading.set(step, loading))
            .await;
    }
}
