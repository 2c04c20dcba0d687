//! # Dependency Wiring / 依赖注入
//!
//! Builds the orchestrator from configuration: the simulated backend behind
//! the account-creation port, the submission policy, and the event sink.

use std::sync::Arc;

use ob_app::{CreateAccount, OnboardingOrchestrator, SubmissionPolicy};
use ob_core::ports::WizardEventPort;
use ob_core::{AppConfig, StepRegistry};
use ob_infra::{LoggingWizardEvents, SimulatedAccountService, SystemClock};
use tracing::info;

/// Everything the driver needs to run one wizard session.
pub struct OnboardingDeps {
    pub orchestrator: Arc<OnboardingOrchestrator>,
    pub accounts: Arc<SimulatedAccountService>,
}

/// Wire the standard six-step wizard against the simulated backend.
///
/// State changes are written to the log.
pub fn wire_onboarding(config: &AppConfig) -> OnboardingDeps {
    wire_onboarding_with_events(config, Arc::new(LoggingWizardEvents::new()))
}

/// Same as [`wire_onboarding`] with a caller-supplied event sink.
pub fn wire_onboarding_with_events(
    config: &AppConfig,
    event_port: Arc<dyn WizardEventPort>,
) -> OnboardingDeps {
    let accounts = Arc::new(SimulatedAccountService::new(
        config.simulation.clone(),
        Arc::new(SystemClock),
    ));
    let policy = SubmissionPolicy::from(&config.submission);
    info!(
        timeout_ms = config.submission.timeout_ms,
        max_attempts = policy.attempts(),
        latency_ms = config.simulation.latency_ms,
        force_failure = ?config.simulation.force_failure,
        "wiring onboarding wizard"
    );

    let create_account = Arc::new(CreateAccount::new(accounts.clone(), policy));
    let orchestrator = OnboardingOrchestrator::new(
        Arc::new(StepRegistry::standard()),
        create_account,
        event_port,
    );

    OnboardingDeps {
        orchestrator: Arc::new(orchestrator),
        accounts,
    }
}
