use crate::wizard::WizardState;

/// Receives every state the wizard settles in, so a screen can re-render.
#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_state_changed(&self, state: &WizardState);
}
