//! Role selection state machine.
//!
//! Pure transition function; the confirmation request itself is an action.

use crate::auth::{is_valid_email, Role};
use crate::school::School;

#[derive(Debug, Clone, PartialEq)]
pub enum RoleSelectionState {
    /// Waiting for the available schools.
    Loading,
    PickSchool {
        schools: Vec<School>,
        error: Option<RoleSelectionError>,
    },
    PickRole {
        schools: Vec<School>,
        school: School,
    },
    ConfirmEmail {
        schools: Vec<School>,
        school: School,
        role: Role,
        email: String,
        error: Option<RoleSelectionError>,
    },
    Confirmed {
        school: School,
        role: Role,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleSelectionEvent {
    SchoolsLoaded(Vec<School>),
    SchoolsFailed,
    PickSchool(School),
    /// `known_email` is the signed-in user's email, used to pre-fill the form.
    PickRole { role: Role, known_email: Option<String> },
    EditEmail(String),
    Confirm,
    ConfirmSucceeded,
    ConfirmFailed(String),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelectionAction {
    LoadSchools,
    ConfirmSelection {
        school: crate::ids::SchoolId,
        role: Role,
        email: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleSelectionError {
    #[error("No schools available for your account. Please contact your administrator.")]
    NoSchools,
    #[error("Unable to load schools. Please try again or contact support.")]
    LoadFailed,
    #[error("Please complete all steps: select school, role, and enter your email")]
    Incomplete,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{0}")]
    Rejected(String),
}

pub struct RoleSelectionStateMachine;

impl RoleSelectionStateMachine {
    pub fn initial() -> (RoleSelectionState, Vec<RoleSelectionAction>) {
        (RoleSelectionState::Loading, vec![RoleSelectionAction::LoadSchools])
    }

    pub fn transition(
        state: RoleSelectionState,
        event: RoleSelectionEvent,
    ) -> (RoleSelectionState, Vec<RoleSelectionAction>) {
        use RoleSelectionEvent as E;
        use RoleSelectionState as S;

        match (state, event) {
            (S::Loading, E::SchoolsLoaded(schools)) => {
                let error = schools.is_empty().then_some(RoleSelectionError::NoSchools);
                (S::PickSchool { schools, error }, Vec::new())
            }
            (S::Loading, E::SchoolsFailed) => (
                S::PickSchool {
                    schools: Vec::new(),
                    error: Some(RoleSelectionError::LoadFailed),
                },
                Vec::new(),
            ),
            (S::PickSchool { schools, .. }, E::PickSchool(school)) => {
                (S::PickRole { schools, school }, Vec::new())
            }
            (S::PickRole { schools, school }, E::PickRole { role, known_email }) => (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    email: known_email.unwrap_or_default(),
                    error: None,
                },
                Vec::new(),
            ),
            (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    ..
                },
                E::EditEmail(email),
            ) => (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    email,
                    error: None,
                },
                Vec::new(),
            ),
            (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    email,
                    ..
                },
                E::Confirm,
            ) => {
                let email = email.trim().to_string();
                let error = if email.is_empty() {
                    Some(RoleSelectionError::Incomplete)
                } else if !is_valid_email(&email) {
                    Some(RoleSelectionError::InvalidEmail)
                } else {
                    None
                };
                if let Some(error) = error {
                    return (
                        S::ConfirmEmail {
                            schools,
                            school,
                            role,
                            email,
                            error: Some(error),
                        },
                        Vec::new(),
                    );
                }
                let action = RoleSelectionAction::ConfirmSelection {
                    school: school.id,
                    role,
                    email: email.clone(),
                };
                (
                    S::ConfirmEmail {
                        schools,
                        school,
                        role,
                        email,
                        error: None,
                    },
                    vec![action],
                )
            }
            (S::ConfirmEmail { school, role, .. }, E::ConfirmSucceeded) => {
                (S::Confirmed { school, role }, Vec::new())
            }
            (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    email,
                    ..
                },
                E::ConfirmFailed(reason),
            ) => (
                S::ConfirmEmail {
                    schools,
                    school,
                    role,
                    email,
                    error: Some(RoleSelectionError::Rejected(reason)),
                },
                Vec::new(),
            ),
            (S::PickRole { schools, .. }, E::Back) => (
                S::PickSchool {
                    schools,
                    error: None,
                },
                Vec::new(),
            ),
            (S::ConfirmEmail { schools, school, .. }, E::Back) => {
                (S::PickRole { schools, school }, Vec::new())
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}
