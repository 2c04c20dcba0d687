use serde::{Deserialize, Serialize};

use super::{FieldKey, FieldKind, FieldValue, FormError, IdType};
use crate::security::{PinCode, SecretText};

/// The single record carried across every wizard step.
///
/// 贯穿整个向导的表单数据。
///
/// Fields are only ever overwritten, never removed; the whole value is dropped
/// when the wizard completes or is abandoned. PINs and security answers are
/// [`SecretText`] and skipped by serde, so a serialized snapshot never carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatedFormData {
    // Identity
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub marital_status: String,
    pub nationality: String,
    pub place_of_birth: String,

    // Document
    pub id_type: Option<IdType>,
    pub id_number: String,
    pub issuing_country: String,
    pub expiry_date: String,

    // Contact
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,

    // Employment / income
    pub occupation: String,
    pub employer_name: String,
    pub employer_address: String,
    pub employment_type: String,
    pub monthly_income: String,
    pub source_of_funds: String,
    pub additional_income: String,

    // Risk profile
    pub banking_history: String,
    pub credit_history: String,
    pub investment_experience: String,
    pub risk_tolerance: String,
    pub expected_transaction_volume: String,
    pub account_purpose: String,

    // Security
    #[serde(skip)]
    pub pin: PinCode,
    #[serde(skip)]
    pub confirm_pin: PinCode,
    pub security_question_1: String,
    #[serde(skip)]
    pub security_answer_1: SecretText,
    pub security_question_2: String,
    #[serde(skip)]
    pub security_answer_2: SecretText,
    pub agree_to_terms: bool,
    pub agree_to_marketing: bool,
    pub agree_to_data_processing: bool,
}

/// Maps plain-text keys to their backing `String` fields in both directions.
macro_rules! text_slots {
    ($($key:ident => $field:ident),* $(,)?) => {
        fn text_slot(&self, key: FieldKey) -> Option<&String> {
            match key {
                $(FieldKey::$key => Some(&self.$field),)*
                _ => None,
            }
        }

        fn text_slot_mut(&mut self, key: FieldKey) -> Option<&mut String> {
            match key {
                $(FieldKey::$key => Some(&mut self.$field),)*
                _ => None,
            }
        }
    };
}

impl AccumulatedFormData {
    pub fn new() -> Self {
        Self::default()
    }

    text_slots! {
        FullName => full_name,
        DateOfBirth => date_of_birth,
        Gender => gender,
        MaritalStatus => marital_status,
        Nationality => nationality,
        PlaceOfBirth => place_of_birth,
        IdNumber => id_number,
        IssuingCountry => issuing_country,
        ExpiryDate => expiry_date,
        PhoneNumber => phone_number,
        Email => email,
        Address => address,
        City => city,
        State => state,
        PostalCode => postal_code,
        Country => country,
        EmergencyContactName => emergency_contact_name,
        EmergencyContactPhone => emergency_contact_phone,
        EmergencyContactRelationship => emergency_contact_relationship,
        Occupation => occupation,
        EmployerName => employer_name,
        EmployerAddress => employer_address,
        EmploymentType => employment_type,
        MonthlyIncome => monthly_income,
        SourceOfFunds => source_of_funds,
        AdditionalIncome => additional_income,
        BankingHistory => banking_history,
        CreditHistory => credit_history,
        InvestmentExperience => investment_experience,
        RiskTolerance => risk_tolerance,
        ExpectedTransactionVolume => expected_transaction_volume,
        AccountPurpose => account_purpose,
        SecurityQuestion1 => security_question_1,
        SecurityQuestion2 => security_question_2,
    }

    fn secret_slot(&self, key: FieldKey) -> Option<&SecretText> {
        match key {
            FieldKey::Pin => Some(&self.pin),
            FieldKey::ConfirmPin => Some(&self.confirm_pin),
            FieldKey::SecurityAnswer1 => Some(&self.security_answer_1),
            FieldKey::SecurityAnswer2 => Some(&self.security_answer_2),
            _ => None,
        }
    }

    fn secret_slot_mut(&mut self, key: FieldKey) -> Option<&mut SecretText> {
        match key {
            FieldKey::Pin => Some(&mut self.pin),
            FieldKey::ConfirmPin => Some(&mut self.confirm_pin),
            FieldKey::SecurityAnswer1 => Some(&mut self.security_answer_1),
            FieldKey::SecurityAnswer2 => Some(&mut self.security_answer_2),
            _ => None,
        }
    }

    /// Write a single field.
    ///
    /// The record is left untouched when the value does not fit the field.
    pub fn set_field(
        &mut self,
        key: FieldKey,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let kind = key.kind();
        match value.into() {
            FieldValue::Text(text) if kind.accepts_text() => self.write_text(key, kind, text),
            FieldValue::Flag(flag) if kind == FieldKind::Flag => {
                match key {
                    FieldKey::AgreeToTerms => self.agree_to_terms = flag,
                    FieldKey::AgreeToMarketing => self.agree_to_marketing = flag,
                    _ => self.agree_to_data_processing = flag,
                }
                Ok(())
            }
            _ => Err(FormError::KindMismatch {
                field: key,
                expected: kind,
            }),
        }
    }

    fn write_text(
        &mut self,
        key: FieldKey,
        kind: FieldKind,
        text: String,
    ) -> Result<(), FormError> {
        match kind {
            FieldKind::Choice => {
                self.id_type = if text.trim().is_empty() {
                    None
                } else {
                    Some(text.parse()?)
                };
            }
            FieldKind::Secret => {
                if let Some(slot) = self.secret_slot_mut(key) {
                    slot.replace(text);
                }
            }
            _ => {
                if let Some(slot) = self.text_slot_mut(key) {
                    *slot = text;
                }
            }
        }
        Ok(())
    }

    /// Textual value of a field; `None` for consent flags.
    ///
    /// Unset values read as `""`. Secret fields are returned raw, so callers
    /// must not log the result for keys of [`FieldKind::Secret`].
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        match key.kind() {
            FieldKind::Choice => Some(self.id_type.map(|t| t.as_str()).unwrap_or("")),
            FieldKind::Secret => self.secret_slot(key).map(SecretText::expose),
            _ => self.text_slot(key).map(String::as_str),
        }
    }

    /// Consent value of a flag field; `None` for every other field.
    pub fn flag(&self, key: FieldKey) -> Option<bool> {
        match key {
            FieldKey::AgreeToTerms => Some(self.agree_to_terms),
            FieldKey::AgreeToMarketing => Some(self.agree_to_marketing),
            FieldKey::AgreeToDataProcessing => Some(self.agree_to_data_processing),
            _ => None,
        }
    }

    /// Whether a field counts as answered.
    ///
    /// Whitespace-only text is empty. Flags are always answered; whether they
    /// must be `true` is a validator decision.
    pub fn is_filled(&self, key: FieldKey) -> bool {
        match key.kind() {
            FieldKind::Flag => true,
            FieldKind::Choice => self.id_type.is_some(),
            FieldKind::Secret | FieldKind::Text => self
                .text(key)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false),
        }
    }

    /// The subset of `keys` that is not filled, in the given order.
    pub fn missing(&self, keys: &[FieldKey]) -> Vec<FieldKey> {
        keys.iter()
            .copied()
            .filter(|key| !self.is_filled(*key))
            .collect()
    }
}
