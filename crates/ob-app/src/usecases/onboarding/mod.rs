//! Onboarding use cases.
//!
//! This module exposes the wizard orchestrator and the account-creation use case.

mod context;
pub mod create_account;
pub mod orchestrator;

pub use context::WizardContext;
pub use create_account::{CreateAccount, SubmissionPolicy};
pub use orchestrator::{OnboardingError, OnboardingOrchestrator};
