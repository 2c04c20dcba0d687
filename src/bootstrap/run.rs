//! Replays a profile through the wizard the way an applicant would:
//! fill in every field, then press Next until the wizard stops.

use ob_app::OnboardingOrchestrator;
use ob_core::{AccountHandle, StepError, WizardPhase};
use tracing::{info, info_span, warn, Instrument};

use crate::profile::Profile;

/// How a replayed session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(AccountHandle),
    /// The wizard refused to leave a step.
    Stopped {
        step: usize,
        title: String,
        error: StepError,
    },
    Abandoned,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

pub async fn run_profile(
    orchestrator: &OnboardingOrchestrator,
    profile: &Profile,
) -> anyhow::Result<RunOutcome> {
    let span = info_span!("driver.run_profile", fields = profile.fields.len());
    replay(orchestrator, profile).instrument(span).await
}

async fn replay(
    orchestrator: &OnboardingOrchestrator,
    profile: &Profile,
) -> anyhow::Result<RunOutcome> {
    for (key, value) in &profile.fields {
        orchestrator.update_field(*key, value.clone()).await?;
    }

    // One press per step plus the submission.
    let max_presses = orchestrator.registry().step_count() + 1;
    for _ in 0..max_presses {
        let state = orchestrator.next().await?;
        match state.phase {
            WizardPhase::Completed => {
                if let Some(account) = state.account {
                    info!(account_id = %account.account_id, "profile completed onboarding");
                    return Ok(RunOutcome::Completed(account));
                }
                anyhow::bail!("wizard completed without an account handle");
            }
            WizardPhase::Abandoned => return Ok(RunOutcome::Abandoned),
            WizardPhase::Step(step) => {
                if let Some(error) = state.error {
                    let title = orchestrator
                        .registry()
                        .get_step(step)
                        .map(|s| s.title.to_string())
                        .unwrap_or_default();
                    warn!(step = step + 1, error = %error.message(), "profile stopped");
                    return Ok(RunOutcome::Stopped { step, title, error });
                }
            }
            WizardPhase::Submitting => {}
        }
    }

    anyhow::bail!("wizard did not finish after {max_presses} presses")
}
