//! Wizard domain module.
//!
//! This module defines the onboarding wizard state machine types.

mod action;
mod event;
mod state;
pub mod state_machine;

pub use action::WizardAction;
pub use event::WizardEvent;
pub use state::{StepError, WizardPhase, WizardState, SUBMISSION_FAILED_MESSAGE};
pub use state_machine::WizardStateMachine;
