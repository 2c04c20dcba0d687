//! Onboarding Application Orchestration Layer
//!
//! This crate contains the wizard use cases: the orchestrator that drives the
//! pure state machine and runs its side effects, and the account-creation use
//! case that applies timeout and retry policy to the backend port.

pub mod usecases;

pub use usecases::onboarding::{
    CreateAccount, OnboardingError, OnboardingOrchestrator, SubmissionPolicy,
};
