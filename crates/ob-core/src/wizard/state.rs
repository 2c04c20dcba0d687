use serde::{Deserialize, Serialize};

use crate::account::{AccountCreationFailureKind, AccountHandle};
use crate::form::AccumulatedFormData;
use crate::validation::ValidationFailure;

/// Message shown on the security step when account creation fails.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "We couldn't create your account. Please try again.";

/// Where the wizard is.
///
/// 向导阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardPhase {
    /// Collecting data for the step at this index.
    ///
    /// 正在填写第 N 步。
    Step(usize),
    /// Waiting on the account-creation collaborator.
    ///
    /// 提交中。
    Submitting,
    /// Account created. Terminal.
    ///
    /// 完成。
    Completed,
    /// Applicant left before completion. Terminal.
    ///
    /// 已放弃。
    Abandoned,
}

/// Error attached to the active step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepError {
    Validation(ValidationFailure),
    Submission {
        kind: AccountCreationFailureKind,
        message: String,
    },
}

impl StepError {
    /// The single line shown next to the step.
    pub fn message(&self) -> &str {
        match self {
            StepError::Validation(failure) => &failure.message,
            StepError::Submission { message, .. } => message,
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            StepError::Validation(failure) => Some(failure),
            StepError::Submission { .. } => None,
        }
    }
}

/// Full wizard state.
///
/// 向导完整状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub phase: WizardPhase,
    pub data: AccumulatedFormData,
    pub error: Option<StepError>,
    pub account: Option<AccountHandle>,
}

impl WizardState {
    /// Fresh wizard on the first step with an empty record.
    pub fn new() -> Self {
        Self::with_data(AccumulatedFormData::default())
    }

    /// Fresh wizard on the first step with pre-filled data.
    pub fn with_data(data: AccumulatedFormData) -> Self {
        Self {
            phase: WizardPhase::Step(0),
            data,
            error: None,
            account: None,
        }
    }

    pub fn current_step_index(&self) -> Option<usize> {
        match self.phase {
            WizardPhase::Step(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, WizardPhase::Completed | WizardPhase::Abandoned)
    }

    /// Whether field edits are currently accepted.
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, WizardPhase::Step(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(StepError::message)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
