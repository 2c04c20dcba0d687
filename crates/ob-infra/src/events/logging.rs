use async_trait::async_trait;
use ob_core::ports::WizardEventPort;
use ob_core::{AccumulatedFormData, FieldKey, WizardPhase, WizardState};
use tracing::{debug, info, warn};

/// Writes every wizard state to the log.
///
/// Form values never reach the log; the `debug` line lists which fields are
/// answered, by name only.
#[derive(Debug, Default)]
pub struct LoggingWizardEvents;

impl LoggingWizardEvents {
    pub fn new() -> Self {
        Self
    }
}

/// Names of the fields that hold an answer. Consent flags count when `true`.
fn answered_fields(data: &AccumulatedFormData) -> Vec<&'static str> {
    FieldKey::ALL
        .iter()
        .filter(|key| match data.flag(**key) {
            Some(flag) => flag,
            None => data.is_filled(**key),
        })
        .map(|key| key.as_str())
        .collect()
}

#[async_trait]
impl WizardEventPort for LoggingWizardEvents {
    async fn emit_state_changed(&self, state: &WizardState) {
        match state.phase {
            WizardPhase::Step(index) => info!(step = index + 1, "wizard on step"),
            WizardPhase::Submitting => info!("wizard submitting"),
            WizardPhase::Completed => info!(
                account_id = ?state.account.as_ref().map(|a| a.account_id.as_str()),
                "wizard completed"
            ),
            WizardPhase::Abandoned => info!("wizard abandoned"),
        }

        if let Some(message) = state.error_message() {
            warn!(phase = ?state.phase, error = %message, "wizard step error");
        }

        let answered = answered_fields(&state.data);
        debug!(count = answered.len(), fields = ?answered, "wizard form answered fields");
    }
}
