//! Validator for the security & terms step.
//!
//! Checks run in a fixed order and stop at the first failure; the order decides
//! which message the applicant sees. Equality is checked before length, so a
//! matching but short PIN reports the length problem.

use crate::form::{AccumulatedFormData, FieldKey};
use crate::validation::{ValidationCode, ValidationFailure, ValidationResult};

/// Required length of the transaction PIN.
pub const PIN_LENGTH: usize = 4;

pub const PIN_EMPTY_MESSAGE: &str = "Please create and confirm your PIN.";
pub const PIN_MISMATCH_MESSAGE: &str = "PINs do not match. Please try again.";
pub const PIN_LENGTH_MESSAGE: &str = "PIN must be exactly 4 digits.";
pub const TERMS_MESSAGE: &str = "You must agree to the terms of service to continue.";

/// Validate PIN pair and terms consent.
pub fn validate_security(data: &AccumulatedFormData) -> ValidationResult {
    check_pin_present(data)?;
    check_pin_matches(data)?;
    check_pin_length(data)?;
    check_terms(data)
}

fn check_pin_present(data: &AccumulatedFormData) -> ValidationResult {
    let missing: Vec<FieldKey> = [
        (FieldKey::Pin, &data.pin),
        (FieldKey::ConfirmPin, &data.confirm_pin),
    ]
    .into_iter()
    .filter(|(_, pin)| pin.is_blank())
    .map(|(key, _)| key)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCode::PinMissing,
            missing,
            PIN_EMPTY_MESSAGE,
        ))
    }
}

fn check_pin_matches(data: &AccumulatedFormData) -> ValidationResult {
    if data.pin == data.confirm_pin {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCode::PinMismatch,
            vec![FieldKey::ConfirmPin],
            PIN_MISMATCH_MESSAGE,
        ))
    }
}

fn check_pin_length(data: &AccumulatedFormData) -> ValidationResult {
    if data.pin.char_len() == PIN_LENGTH && data.pin.is_all_digits() {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCode::PinLength,
            vec![FieldKey::Pin, FieldKey::ConfirmPin],
            PIN_LENGTH_MESSAGE,
        ))
    }
}

fn check_terms(data: &AccumulatedFormData) -> ValidationResult {
    if data.agree_to_terms {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCode::TermsNotAccepted,
            vec![FieldKey::AgreeToTerms],
            TERMS_MESSAGE,
        ))
    }
}
