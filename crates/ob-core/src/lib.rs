//! # ob-core
//!
//! Core domain models and business logic for the account onboarding wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the accumulated form record, the step registry and its validators, the
//! security finalizer and the wizard state machine. Side effects are expressed
//! through the traits in [`ports`].

// Public module exports
pub mod account;
pub mod config;
pub mod crypto;
pub mod form;
pub mod ids;
pub mod ports;
pub mod security;
pub mod steps;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use account::{AccountCreationError, AccountCreationFailureKind, AccountHandle};
pub use config::AppConfig;
pub use form::{AccumulatedFormData, FieldKey, FieldValue, FormError, IdType};
pub use ids::AccountId;
pub use steps::{StepDefinition, StepKind, StepRegistry};
pub use validation::{ValidationCode, ValidationFailure, ValidationResult};
pub use wizard::{StepError, WizardAction, WizardEvent, WizardPhase, WizardState, WizardStateMachine};
