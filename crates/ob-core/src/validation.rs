//! Validation results shared by every step validator.

use serde::{Deserialize, Serialize};

use crate::form::{AccumulatedFormData, FieldKey};

/// Message shown when any required field of a step is empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Machine-readable reason a step did not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationCode {
    MissingRequiredFields,
    PinMissing,
    PinMismatch,
    PinLength,
    TermsNotAccepted,
}

/// Why a step refused to advance.
///
/// `message` is the single user-facing line; `fields` names the offending
/// fields so a caller can highlight them individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub code: ValidationCode,
    pub fields: Vec<FieldKey>,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(code: ValidationCode, fields: Vec<FieldKey>, message: impl Into<String>) -> Self {
        Self {
            code,
            fields,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub type ValidationResult = Result<(), ValidationFailure>;

/// Signature shared by all step validators.
pub type Validator = fn(&AccumulatedFormData) -> ValidationResult;

/// Fail with [`ValidationCode::MissingRequiredFields`] if any of `required` is empty.
pub fn require_fields(data: &AccumulatedFormData, required: &[FieldKey]) -> ValidationResult {
    let missing = data.missing(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCode::MissingRequiredFields,
            missing,
            REQUIRED_FIELDS_MESSAGE,
        ))
    }
}
