//! School & role selection wizard.
//!
//! Linear flow run once after login: load schools → pick school → pick role →
//! confirm email → confirmed.

pub mod state_machine;

pub use state_machine::{
    RoleSelectionAction, RoleSelectionError, RoleSelectionEvent, RoleSelectionState,
    RoleSelectionStateMachine,
};
