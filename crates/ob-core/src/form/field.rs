use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FormError;

/// Declares [`FieldKey`] together with its stable wire name and value kind.
macro_rules! field_keys {
    ($($variant:ident => $name:literal : $kind:ident),* $(,)?) => {
        /// Every addressable field of the accumulated record.
        ///
        /// 表单字段键。
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum FieldKey {
            $(
                #[serde(rename = $name)]
                $variant
            ),*
        }

        impl FieldKey {
            pub const ALL: &'static [FieldKey] = &[$(FieldKey::$variant),*];

            /// Stable snake_case name, used by profiles and error payloads.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(FieldKey::$variant => $name),*
                }
            }

            pub fn kind(&self) -> FieldKind {
                match self {
                    $(FieldKey::$variant => FieldKind::$kind),*
                }
            }
        }
    };
}

field_keys! {
    // Identity
    FullName => "full_name": Text,
    DateOfBirth => "date_of_birth": Text,
    Gender => "gender": Text,
    MaritalStatus => "marital_status": Text,
    Nationality => "nationality": Text,
    PlaceOfBirth => "place_of_birth": Text,
    // Document
    IdType => "id_type": Choice,
    IdNumber => "id_number": Text,
    IssuingCountry => "issuing_country": Text,
    ExpiryDate => "expiry_date": Text,
    // Contact
    PhoneNumber => "phone_number": Text,
    Email => "email": Text,
    Address => "address": Text,
    City => "city": Text,
    State => "state": Text,
    PostalCode => "postal_code": Text,
    Country => "country": Text,
    EmergencyContactName => "emergency_contact_name": Text,
    EmergencyContactPhone => "emergency_contact_phone": Text,
    EmergencyContactRelationship => "emergency_contact_relationship": Text,
    // Employment / income
    Occupation => "occupation": Text,
    EmployerName => "employer_name": Text,
    EmployerAddress => "employer_address": Text,
    EmploymentType => "employment_type": Text,
    MonthlyIncome => "monthly_income": Text,
    SourceOfFunds => "source_of_funds": Text,
    AdditionalIncome => "additional_income": Text,
    // Risk profile
    BankingHistory => "banking_history": Text,
    CreditHistory => "credit_history": Text,
    InvestmentExperience => "investment_experience": Text,
    RiskTolerance => "risk_tolerance": Text,
    ExpectedTransactionVolume => "expected_transaction_volume": Text,
    AccountPurpose => "account_purpose": Text,
    // Security
    Pin => "pin": Secret,
    ConfirmPin => "confirm_pin": Secret,
    SecurityQuestion1 => "security_question_1": Text,
    SecurityAnswer1 => "security_answer_1": Secret,
    SecurityQuestion2 => "security_question_2": Text,
    SecurityAnswer2 => "security_answer_2": Secret,
    AgreeToTerms => "agree_to_terms": Flag,
    AgreeToMarketing => "agree_to_marketing": Flag,
    AgreeToDataProcessing => "agree_to_data_processing": Flag,
}

/// Shape of the value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Text drawn from a closed set (parsed on write).
    Choice,
    /// Text kept in a redacting wrapper.
    Secret,
    /// Boolean consent.
    Flag,
}

impl FieldKind {
    pub fn accepts_text(&self) -> bool {
        !matches!(self, FieldKind::Flag)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == needle)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// A value written into the record by a field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}
