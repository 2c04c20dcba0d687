//! Onboarding orchestrator.
//!
//! This module coordinates the wizard state machine and its side effects.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use ob_core::{
    form::{FieldKey, FieldValue, FormError},
    ports::WizardEventPort,
    steps::{StepDefinition, StepRegistry},
    wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine},
};

use crate::usecases::onboarding::context::WizardContext;
use crate::usecases::onboarding::CreateAccount;

/// Errors produced by the onboarding orchestrator.
///
/// Validation and submission failures are not errors here: they are carried in
/// [`WizardState::error`]. These are requests the wizard refuses outright.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("account creation is in progress")]
    SubmissionInFlight,
    #[error("the wizard has already finished")]
    WizardClosed,
    #[error("invalid field value: {0}")]
    Form(#[from] FormError),
}

/// Orchestrator that drives wizard state and side effects.
pub struct OnboardingOrchestrator {
    registry: Arc<StepRegistry>,
    context: Arc<WizardContext>,

    create_account: Arc<CreateAccount>,
    event_port: Arc<dyn WizardEventPort>,
}

impl OnboardingOrchestrator {
    pub fn new(
        registry: Arc<StepRegistry>,
        create_account: Arc<CreateAccount>,
        event_port: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self::with_context(
            registry,
            WizardContext::default().arc(),
            create_account,
            event_port,
        )
    }

    pub fn with_context(
        registry: Arc<StepRegistry>,
        context: Arc<WizardContext>,
        create_account: Arc<CreateAccount>,
        event_port: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self {
            registry,
            context,
            create_account,
            event_port,
        }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub async fn get_state(&self) -> WizardState {
        self.context.get_state().await
    }

    /// Definition of the step being shown, if the wizard is on a step.
    pub async fn current_step(&self) -> Option<StepDefinition> {
        let index = self.context.get_state().await.current_step_index()?;
        self.registry.get_step(index).ok().cloned()
    }

    /// Apply a single field edit.
    ///
    /// The step error stays until the next successful validation.
    pub async fn update_field(
        &self,
        key: FieldKey,
        value: impl Into<FieldValue>,
    ) -> Result<WizardState, OnboardingError> {
        self.reject_while_submitting().await?;
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let mut state = self.context.get_state().await;
        if !state.accepts_input() {
            return Err(Self::refusal(&state));
        }
        state.data.set_field(key, value).map_err(|err| {
            warn!(field = %key, error = %err, "wizard field rejected");
            err
        })?;
        debug!(field = %key, "wizard field updated");

        self.set_state_and_emit(state.clone()).await;
        Ok(state)
    }

    pub async fn next(&self) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::Next).await
    }

    pub async fn back(&self) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::Back).await
    }

    /// Leave the wizard; everything entered so far is dropped.
    pub async fn abandon(&self) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::Abandon).await
    }

    async fn dispatch(&self, event: WizardEvent) -> Result<WizardState, OnboardingError> {
        self.reject_while_submitting().await?;
        // Serialize dispatch calls so two Next presses cannot both submit.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.onboarding_orchestrator.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.phase;
                let event_name = format!("{:?}", event);
                let (next, actions) =
                    WizardStateMachine::transition(&self.registry, current, event);
                info!(from = ?from, to = ?next.phase, event = %event_name, "wizard state transition");
                if let Some(error) = &next.error {
                    warn!(phase = ?next.phase, error = %error.message(), "wizard step reported an error");
                }

                // Publish before running actions so callers observe `Submitting`
                // while the backend call is in flight.
                self.set_state_and_emit(next.clone()).await;
                let follow_up_events = self.execute_actions(actions, &next).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction>,
        state: &WizardState,
    ) -> Vec<WizardEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::CreateAccount => {
                    let event = match self.create_account.execute(&state.data).await {
                        Ok(account) => WizardEvent::SubmissionSucceeded { account },
                        Err(error) => {
                            warn!(error = %error, kind = ?error.kind(), "wizard submission failed");
                            WizardEvent::SubmissionFailed { error }
                        }
                    };
                    follow_up_events.push(event);
                }
                WizardAction::NotifyCompleted { account } => {
                    info!(
                        account_id = %account.account_id,
                        "onboarding completed, caller should redirect"
                    );
                }
                WizardAction::DiscardData => {
                    info!("onboarding abandoned, entered data discarded");
                }
            }
        }
        follow_up_events
    }

    async fn reject_while_submitting(&self) -> Result<(), OnboardingError> {
        if self.context.get_state().await.is_submitting() {
            warn!("wizard request rejected: submission in flight");
            return Err(OnboardingError::SubmissionInFlight);
        }
        Ok(())
    }

    fn refusal(state: &WizardState) -> OnboardingError {
        if state.is_submitting() {
            OnboardingError::SubmissionInFlight
        } else {
            OnboardingError::WizardClosed
        }
    }

    async fn set_state_and_emit(&self, state: WizardState) {
        self.context.set_state(state.clone()).await;
        self.event_port.emit_state_changed(&state).await;
    }
}
