//! School selection orchestrator.
//!
//! Coordinates the role-selection state machine and its backend calls.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, Instrument};

use bi_core::auth::Role;
use bi_core::ids::SchoolId;
use bi_core::ports::AuthApiPort;
use bi_core::role_selection::{
    RoleSelectionAction, RoleSelectionEvent, RoleSelectionState, RoleSelectionStateMachine,
};

use crate::session::SessionStore;

/// Errors produced by the school selection orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum SchoolSelectionError {
    #[error("Authentication required. Please login again.")]
    MissingToken,
    #[error("school {0} is not in the available list")]
    UnknownSchool(SchoolId),
}

/// Orchestrator that drives the school/role wizard and its side effects.
pub struct SchoolSelectionOrchestrator {
    state: Mutex<RoleSelectionState>,
    /// Serializes dispatch so a transition and its actions run as one unit.
    dispatch_lock: Mutex<()>,
    api: Arc<dyn AuthApiPort>,
    session: SessionStore,
}

impl SchoolSelectionOrchestrator {
    pub fn new(api: Arc<dyn AuthApiPort>, session: SessionStore) -> Self {
        Self {
            state: Mutex::new(RoleSelectionState::Loading),
            dispatch_lock: Mutex::new(()),
            api,
            session,
        }
    }

    /// Load the available schools.
    pub async fn start(&self) -> Result<RoleSelectionState, SchoolSelectionError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        let (initial, actions) = RoleSelectionStateMachine::initial();
        *self.state.lock().await = initial.clone();
        self.run(initial, actions).await
    }

    pub async fn pick_school(&self, school_id: SchoolId) -> Result<RoleSelectionState, SchoolSelectionError> {
        let school = match &*self.state.lock().await {
            RoleSelectionState::PickSchool { schools, .. } => {
                schools.iter().find(|school| school.id == school_id).cloned()
            }
            _ => None,
        }
        .ok_or(SchoolSelectionError::UnknownSchool(school_id))?;
        self.dispatch(RoleSelectionEvent::PickSchool(school)).await
    }

    pub async fn pick_role(&self, role: Role) -> Result<RoleSelectionState, SchoolSelectionError> {
        let known_email = self
            .session
            .user()
            .await
            .map(|user| user.email)
            .filter(|email| !email.is_empty());
        self.dispatch(RoleSelectionEvent::PickRole { role, known_email })
            .await
    }

    pub async fn edit_email(&self, email: String) -> Result<RoleSelectionState, SchoolSelectionError> {
        self.dispatch(RoleSelectionEvent::EditEmail(email)).await
    }

    pub async fn confirm(&self) -> Result<RoleSelectionState, SchoolSelectionError> {
        self.dispatch(RoleSelectionEvent::Confirm).await
    }

    pub async fn back(&self) -> Result<RoleSelectionState, SchoolSelectionError> {
        self.dispatch(RoleSelectionEvent::Back).await
    }

    pub async fn state(&self) -> RoleSelectionState {
        self.state.lock().await.clone()
    }

    async fn dispatch(&self, event: RoleSelectionEvent) -> Result<RoleSelectionState, SchoolSelectionError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let span = info_span!("usecase.school_selection.dispatch", event = ?event);
        async {
            let current = self.state.lock().await.clone();
            let (next, actions) = RoleSelectionStateMachine::transition(current, event);
            *self.state.lock().await = next.clone();
            self.run(next, actions).await
        }
        .instrument(span)
        .await
    }

    /// Execute actions and feed their follow-up events back into the machine.
    async fn run(
        &self,
        mut current: RoleSelectionState,
        actions: Vec<RoleSelectionAction>,
    ) -> Result<RoleSelectionState, SchoolSelectionError> {
        let mut pending_events = self.execute_actions(&current, actions).await?;

        while let Some(event) = pending_events.pop() {
            let (next, actions) = RoleSelectionStateMachine::transition(current, event);
            *self.state.lock().await = next.clone();
            pending_events.extend(self.execute_actions(&next, actions).await?);
            current = next;
        }

        Ok(current)
    }

    async fn execute_actions(
        &self,
        current: &RoleSelectionState,
        actions: Vec<RoleSelectionAction>,
    ) -> Result<Vec<RoleSelectionEvent>, SchoolSelectionError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "school selection executing action");
            let token = self
                .session
                .token()
                .await
                .ok_or(SchoolSelectionError::MissingToken)?;
            match action {
                RoleSelectionAction::LoadSchools => {
                    match self.api.available_schools(&token).await {
                        Ok(schools) => {
                            info!(count = schools.len(), "available schools loaded");
                            follow_up_events.push(RoleSelectionEvent::SchoolsLoaded(schools));
                        }
                        Err(err) => {
                            error!(error = %err, "failed to load available schools");
                            follow_up_events.push(RoleSelectionEvent::SchoolsFailed);
                        }
                    }
                }
                RoleSelectionAction::ConfirmSelection {
                    school,
                    role,
                    email,
                } => match self.api.select_school(&token, school, role, &email).await {
                    Ok(receipt) => {
                        info!(school_id = %school, role = %role, message = ?receipt.message, "school and role confirmed");
                        if let RoleSelectionState::ConfirmEmail { school, .. } = current {
                            self.session.set_school_and_role(school.clone(), role).await;
                        }
                        follow_up_events.push(RoleSelectionEvent::ConfirmSucceeded);
                    }
                    Err(err) => {
                        error!(error = %err, school_id = %school, "school confirmation failed");
                        follow_up_events.push(RoleSelectionEvent::ConfirmFailed(err.to_string()));
                    }
                },
            }
        }
        Ok(follow_up_events)
    }
}
