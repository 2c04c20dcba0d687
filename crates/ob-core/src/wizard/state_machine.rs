//! Wizard state machine.
//!
//! Defines a pure state transition function for the onboarding wizard. The
//! only side effects are the returned [`WizardAction`]s, executed by the
//! caller.

use super::{StepError, WizardAction, WizardEvent, WizardPhase, WizardState};
use crate::form::AccumulatedFormData;
use crate::steps::StepRegistry;
use crate::wizard::SUBMISSION_FAILED_MESSAGE;

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    /// Apply `event` to `state`.
    ///
    /// # Panics
    ///
    /// If `state` sits on a step index the registry does not have. The
    /// controller is the only writer of the index, so this is a bug, not input.
    pub fn transition(
        registry: &StepRegistry,
        mut state: WizardState,
        event: WizardEvent,
    ) -> (WizardState, Vec<WizardAction>) {
        match (state.phase, event) {
            (WizardPhase::Step(index), WizardEvent::Next) => {
                let step = registry
                    .get_step(index)
                    .unwrap_or_else(|err| panic!("wizard state corrupted: {err}"));
                match step.validate(&state.data) {
                    Err(failure) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            step = index,
                            code = ?failure.code,
                            fields = ?failure.fields,
                            "wizard step validation failed"
                        );
                        state.error = Some(StepError::Validation(failure));
                        (state, Vec::new())
                    }
                    Ok(()) if index < registry.last_index() => {
                        state.phase = WizardPhase::Step(index + 1);
                        state.error = None;
                        (state, Vec::new())
                    }
                    Ok(()) => {
                        state.phase = WizardPhase::Submitting;
                        state.error = None;
                        (state, vec![WizardAction::CreateAccount])
                    }
                }
            }
            (WizardPhase::Step(index), WizardEvent::Back) if index > 0 => {
                state.phase = WizardPhase::Step(index - 1);
                state.error = None;
                (state, Vec::new())
            }
            (WizardPhase::Submitting, WizardEvent::SubmissionSucceeded { account }) => {
                state.phase = WizardPhase::Completed;
                state.account = Some(account.clone());
                state.error = None;
                (state, vec![WizardAction::NotifyCompleted { account }])
            }
            (WizardPhase::Submitting, WizardEvent::SubmissionFailed { error }) => {
                state.phase = WizardPhase::Step(registry.last_index());
                state.error = Some(StepError::Submission {
                    kind: error.kind(),
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                });
                (state, Vec::new())
            }
            (WizardPhase::Step(_), WizardEvent::Abandon) => {
                let abandoned = WizardState {
                    phase: WizardPhase::Abandoned,
                    data: AccumulatedFormData::default(),
                    error: None,
                    account: None,
                };
                (abandoned, vec![WizardAction::DiscardData])
            }
            (_, _event) => (state, Vec::new()),
        }
    }
}
