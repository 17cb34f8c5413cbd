use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use bi_core::school::{Assignment, Classroom, Student, Subject};
use bi_core::selection::{Selection, SelectionStep};
use bi_core::upload::{PendingUpload, SubmitButton};

/// Which lists are currently being fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub classrooms: bool,
    pub subjects: bool,
    pub assignments: bool,
    pub students: bool,
}

impl LoadingFlags {
    pub fn set(&mut self, step: SelectionStep, loading: bool) {
        match step {
            SelectionStep::Classroom => self.classrooms = loading,
            SelectionStep::Subject => self.subjects = loading,
            SelectionStep::Assignment => self.assignments = loading,
            SelectionStep::Student => self.students = loading,
        }
    }
}

/// Everything the upload screen renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadScreen {
    pub selection: Selection,
    pub classrooms: Vec<Classroom>,
    pub subjects: Vec<Subject>,
    pub assignments: Vec<Assignment>,
    pub students: Vec<Student>,
    pub loading: LoadingFlags,
    pub pending: PendingUpload,
    pub uploading: bool,
}

impl UploadScreen {
    pub fn submit_button(&self) -> SubmitButton {
        SubmitButton::for_state(&self.pending, self.uploading)
    }

    pub fn clear_list(&mut self, step: SelectionStep) {
        match step {
            SelectionStep::Classroom => self.classrooms.clear(),
            SelectionStep::Subject => self.subjects.clear(),
            SelectionStep::Assignment => self.assignments.clear(),
            SelectionStep::Student => self.students.clear(),
        }
    }

    /// Whether `id` is offered by the list for `step`.
    pub fn offers(&self, step: SelectionStep, id: i64) -> bool {
        match step {
            SelectionStep::Classroom => self.classrooms.iter().any(|c| c.id.value() == id),
            SelectionStep::Subject => self.subjects.iter().any(|s| s.id.value() == id),
            SelectionStep::Assignment => self.assignments.iter().any(|a| a.id.value() == id),
            SelectionStep::Student => self.students.iter().any(|s| s.id.map(|sid| sid.value()) == Some(id)),
        }
    }

    pub fn selected_classroom(&self) -> Option<&Classroom> {
        let id = self.selection.classroom()?;
        self.classrooms.iter().find(|c| c.id == id)
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        let id = self.selection.subject()?;
        self.subjects.iter().find(|s| s.id == id)
    }

    /// The selected assignment, resolved against the loaded list.
    pub fn selected_assignment(&self) -> Option<&Assignment> {
        let id = self.selection.assignment()?;
        self.assignments.iter().find(|a| a.id == id)
    }

    pub fn selected_student(&self) -> Option<&Student> {
        let id = self.selection.student()?;
        self.students.iter().find(|s| s.id == Some(id))
    }
}

/// Shared upload-screen context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `screen`.
/// - `dispatch_lock`: held for a whole selection dispatch, network calls included.
/// - `screen`: held only for short reads and writes, so snapshots never wait on
///   the network.
#[derive(Clone, Default)]
pub struct UploadContext {
    screen: Arc<Mutex<UploadScreen>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl UploadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> UploadScreen {
        self.screen.lock().await.clone()
    }

    pub async fn selection(&self) -> Selection {
        self.screen.lock().await.selection
    }

    /// Apply `f` to the screen under the state lock and return its result.
    pub async fn update<R>(&self, f: impl FnOnce(&mut UploadScreen) -> R) -> R {
        let mut guard = self.screen.lock().await;
        f(&mut guard)
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}
