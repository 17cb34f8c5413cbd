//! Cascading selection domain module.
//!
//! Defines the classroom → subject → assignment → student selection and the
//! pure state machine that drives it.

mod state;
pub mod state_machine;

pub use state::{Selection, SelectionPhase, SelectionStep};
pub use state_machine::{SelectionAction, SelectionEvent, SelectionStateMachine};
