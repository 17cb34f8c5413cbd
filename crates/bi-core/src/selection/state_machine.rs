//! Selection state machine.
//!
//! Defines a pure state transition function for the cascading selection on
//! the upload screen. Side effects (list loading) are returned as actions.

use crate::ids::{AssignmentId, ClassroomId, StudentId, SubjectId};

use super::state::{Selection, SelectionStep};

/// Events that drive the selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The upload screen was mounted.
    Open,
    /// User picked a classroom from the loaded list.
    PickClassroom(ClassroomId),
    /// User picked a subject from the loaded list.
    PickSubject(SubjectId),
    /// User picked an assignment from the loaded list.
    PickAssignment(AssignmentId),
    /// User picked a student from the loaded roster.
    PickStudent(StudentId),
    /// User re-opened an earlier selector: that step and everything after it
    /// is cleared.
    Reopen(SelectionStep),
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// Fetch the teacher's classrooms.
    LoadClassrooms,
    /// Fetch the teacher's subjects.
    LoadSubjects,
    /// Fetch the assignments of a subject.
    LoadAssignments { subject: SubjectId },
    /// Fetch the roster. Classroom-scoped when a classroom is known, with the
    /// subject roster as fallback.
    LoadRoster {
        classroom: Option<ClassroomId>,
        subject: SubjectId,
    },
    /// Drop the option list offered for a step.
    ClearList(SelectionStep),
}

/// Pure selection state machine: no side effects.
pub struct SelectionStateMachine;

impl SelectionStateMachine {
    pub fn transition(state: Selection, event: SelectionEvent) -> (Selection, Vec<SelectionAction>) {
        match event {
            SelectionEvent::Open => (state, vec![SelectionAction::LoadClassrooms]),
            SelectionEvent::PickClassroom(classroom) => {
                if state.classroom() == Some(classroom) {
                    return (state, Vec::new());
                }
                let mut actions = clear_lists_after(SelectionStep::Classroom);
                actions.push(SelectionAction::LoadSubjects);
                (Selection::with_classroom(classroom), actions)
            }
            SelectionEvent::PickSubject(subject) => {
                let Some(classroom) = state.classroom() else {
                    return (state, Vec::new());
                };
                if state.subject() == Some(subject) {
                    return (state, Vec::new());
                }
                let mut next = state;
                next.set_subject(subject);
                let mut actions = clear_lists_after(SelectionStep::Subject);
                actions.push(SelectionAction::LoadAssignments { subject });
                actions.push(SelectionAction::LoadRoster {
                    classroom: Some(classroom),
                    subject,
                });
                (next, actions)
            }
            SelectionEvent::PickAssignment(assignment) => {
                if !state.is_unlocked(SelectionStep::Assignment) {
                    return (state, Vec::new());
                }
                let mut next = state;
                next.set_assignment(assignment);
                (next, Vec::new())
            }
            SelectionEvent::PickStudent(student) => {
                if !state.is_unlocked(SelectionStep::Student) {
                    return (state, Vec::new());
                }
                let mut next = state;
                next.set_student(student);
                (next, Vec::new())
            }
            SelectionEvent::Reopen(step) => {
                let mut next = state;
                next.clear_from(step);
                (next, lists_depending_on(step))
            }
        }
    }
}

fn clear_lists_after(step: SelectionStep) -> Vec<SelectionAction> {
    step.later().map(SelectionAction::ClearList).collect()
}

/// Lists whose contents were loaded from the value held at `step`.
///
/// The roster is keyed by classroom and subject only, so clearing the
/// assignment or student leaves every list in place.
fn lists_depending_on(step: SelectionStep) -> Vec<SelectionAction> {
    match step {
        SelectionStep::Classroom | SelectionStep::Subject => clear_lists_after(step),
        SelectionStep::Assignment | SelectionStep::Student => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionPhase;

    fn at_student() -> Selection {
        let steps = [
            SelectionEvent::PickClassroom(ClassroomId::new(101)),
            SelectionEvent::PickSubject(SubjectId::new(7)),
            SelectionEvent::PickAssignment(AssignmentId::new(9)),
            SelectionEvent::PickStudent(StudentId::new(55)),
        ];
        steps.into_iter().fold(Selection::empty(), |state, event| {
            SelectionStateMachine::transition(state, event).0
        })
    }

    #[test]
    fn open_requests_classrooms() {
        let (next, actions) = SelectionStateMachine::transition(Selection::empty(), SelectionEvent::Open);
        assert_eq!(next, Selection::empty());
        assert_eq!(actions, vec![SelectionAction::LoadClassrooms]);
    }

    #[test]
    fn picking_classroom_resets_dependents_and_loads_subjects() {
        let (next, actions) = SelectionStateMachine::transition(
            at_student(),
            SelectionEvent::PickClassroom(ClassroomId::new(202)),
        );
        assert_eq!(next.phase(), SelectionPhase::ClassroomChosen);
        assert_eq!(next.classroom(), Some(ClassroomId::new(202)));
        assert_eq!(
            actions,
            vec![
                SelectionAction::ClearList(SelectionStep::Subject),
                SelectionAction::ClearList(SelectionStep::Assignment),
                SelectionAction::ClearList(SelectionStep::Student),
                SelectionAction::LoadSubjects,
            ]
        );
    }

    #[test]
    fn picking_same_classroom_is_a_no_op() {
        let state = at_student();
        let (next, actions) = SelectionStateMachine::transition(
            state,
            SelectionEvent::PickClassroom(ClassroomId::new(101)),
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn picking_subject_loads_assignments_and_classroom_roster() {
        let (state, _) = SelectionStateMachine::transition(
            Selection::empty(),
            SelectionEvent::PickClassroom(ClassroomId::new(101)),
        );
        let (next, actions) =
            SelectionStateMachine::transition(state, SelectionEvent::PickSubject(SubjectId::new(7)));
        assert_eq!(next.phase(), SelectionPhase::SubjectChosen);
        assert_eq!(
            actions,
            vec![
                SelectionAction::ClearList(SelectionStep::Assignment),
                SelectionAction::ClearList(SelectionStep::Student),
                SelectionAction::LoadAssignments {
                    subject: SubjectId::new(7)
                },
                SelectionAction::LoadRoster {
                    classroom: Some(ClassroomId::new(101)),
                    subject: SubjectId::new(7),
                },
            ]
        );
    }

    #[test]
    fn picking_assignment_triggers_no_reload() {
        let state = at_student();
        let (next, actions) = SelectionStateMachine::transition(
            state,
            SelectionEvent::PickAssignment(AssignmentId::new(10)),
        );
        assert_eq!(next.assignment(), Some(AssignmentId::new(10)));
        assert_eq!(next.student(), Some(StudentId::new(55)));
        assert!(actions.is_empty());
    }

    #[test]
    fn skipping_a_step_is_ignored() {
        let (next, actions) = SelectionStateMachine::transition(
            Selection::empty(),
            SelectionEvent::PickSubject(SubjectId::new(7)),
        );
        assert_eq!(next, Selection::empty());
        assert!(actions.is_empty());

        let (state, _) = SelectionStateMachine::transition(
            Selection::empty(),
            SelectionEvent::PickClassroom(ClassroomId::new(1)),
        );
        let (next, actions) = SelectionStateMachine::transition(
            state,
            SelectionEvent::PickStudent(StudentId::new(55)),
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn reopening_classroom_clears_everything_downstream() {
        let (next, actions) = SelectionStateMachine::transition(
            at_student(),
            SelectionEvent::Reopen(SelectionStep::Classroom),
        );
        assert_eq!(next, Selection::empty());
        assert_eq!(
            actions,
            vec![
                SelectionAction::ClearList(SelectionStep::Subject),
                SelectionAction::ClearList(SelectionStep::Assignment),
                SelectionAction::ClearList(SelectionStep::Student),
            ]
        );
    }

    #[test]
    fn reopening_assignment_keeps_roster() {
        let (next, actions) = SelectionStateMachine::transition(
            at_student(),
            SelectionEvent::Reopen(SelectionStep::Assignment),
        );
        assert_eq!(next.phase(), SelectionPhase::SubjectChosen);
        assert_eq!(next.student(), None);
        assert!(actions.is_empty());
    }
}
