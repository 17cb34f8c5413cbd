use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, ClassroomId, StudentId, SubjectId};

/// One position in the selection chain, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SelectionStep {
    Classroom,
    Subject,
    Assignment,
    Student,
}

impl SelectionStep {
    pub const ALL: [SelectionStep; 4] = [
        SelectionStep::Classroom,
        SelectionStep::Subject,
        SelectionStep::Assignment,
        SelectionStep::Student,
    ];

    /// The step that must hold a value before this one is enabled.
    pub fn previous(&self) -> Option<SelectionStep> {
        match self {
            SelectionStep::Classroom => None,
            SelectionStep::Subject => Some(SelectionStep::Classroom),
            SelectionStep::Assignment => Some(SelectionStep::Subject),
            SelectionStep::Student => Some(SelectionStep::Assignment),
        }
    }

    /// Every step strictly after this one.
    pub fn later(self) -> impl Iterator<Item = SelectionStep> {
        Self::ALL.into_iter().filter(move |step| *step > self)
    }
}

impl std::fmt::Display for SelectionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SelectionStep::Classroom => "classroom",
            SelectionStep::Subject => "subject",
            SelectionStep::Assignment => "assignment",
            SelectionStep::Student => "student",
        };
        f.write_str(name)
    }
}

/// How far along the chain the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SelectionPhase {
    NoClassroom,
    ClassroomChosen,
    SubjectChosen,
    AssignmentChosen,
    StudentChosen,
}

/// The (classroom, subject, assignment, student) tuple.
///
/// Fields are private so the prefix invariant holds: a set field implies every
/// earlier field is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    classroom: Option<ClassroomId>,
    subject: Option<SubjectId>,
    assignment: Option<AssignmentId>,
    student: Option<StudentId>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn classroom(&self) -> Option<ClassroomId> {
        self.classroom
    }

    pub fn subject(&self) -> Option<SubjectId> {
        self.subject
    }

    pub fn assignment(&self) -> Option<AssignmentId> {
        self.assignment
    }

    pub fn student(&self) -> Option<StudentId> {
        self.student
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.classroom, self.subject, self.assignment, self.student) {
            (None, ..) => SelectionPhase::NoClassroom,
            (Some(_), None, ..) => SelectionPhase::ClassroomChosen,
            (Some(_), Some(_), None, _) => SelectionPhase::SubjectChosen,
            (Some(_), Some(_), Some(_), None) => SelectionPhase::AssignmentChosen,
            (Some(_), Some(_), Some(_), Some(_)) => SelectionPhase::StudentChosen,
        }
    }

    pub fn is_set(&self, step: SelectionStep) -> bool {
        match step {
            SelectionStep::Classroom => self.classroom.is_some(),
            SelectionStep::Subject => self.subject.is_some(),
            SelectionStep::Assignment => self.assignment.is_some(),
            SelectionStep::Student => self.student.is_some(),
        }
    }

    /// A step is unlocked once its predecessor holds a value.
    pub fn is_unlocked(&self, step: SelectionStep) -> bool {
        step.previous().map_or(true, |prev| self.is_set(prev))
    }

    /// Null out `step` and every later position.
    pub fn clear_from(&mut self, step: SelectionStep) {
        if step <= SelectionStep::Classroom {
            self.classroom = None;
        }
        if step <= SelectionStep::Subject {
            self.subject = None;
        }
        if step <= SelectionStep::Assignment {
            self.assignment = None;
        }
        self.student = None;
    }

    pub(crate) fn with_classroom(classroom: ClassroomId) -> Self {
        Self {
            classroom: Some(classroom),
            ..Self::default()
        }
    }

    pub(crate) fn set_subject(&mut self, subject: SubjectId) {
        debug_assert!(self.classroom.is_some());
        self.subject = Some(subject);
        self.assignment = None;
        self.student = None;
    }

    pub(crate) fn set_assignment(&mut self, assignment: AssignmentId) {
        debug_assert!(self.subject.is_some());
        self.assignment = Some(assignment);
    }

    pub(crate) fn set_student(&mut self, student: StudentId) {
        debug_assert!(self.assignment.is_some());
        self.student = Some(student);
    }
}
