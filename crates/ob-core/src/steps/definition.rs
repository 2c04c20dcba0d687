use serde::{Deserialize, Serialize};

use crate::form::{AccumulatedFormData, FieldKey};
use crate::security::validate_security;
use crate::validation::{require_fields, ValidationResult, Validator};

/// Closed set of step kinds the wizard knows how to render and validate.
///
/// 向导步骤类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Personal,
    Identity,
    Contact,
    Employment,
    FinancialProfile,
    Security,
}

const PERSONAL_REQUIRED: &[FieldKey] = &[
    FieldKey::FullName,
    FieldKey::DateOfBirth,
    FieldKey::Gender,
    FieldKey::Nationality,
];

const IDENTITY_REQUIRED: &[FieldKey] = &[
    FieldKey::IdType,
    FieldKey::IdNumber,
    FieldKey::IssuingCountry,
    FieldKey::ExpiryDate,
];

const CONTACT_REQUIRED: &[FieldKey] = &[
    FieldKey::PhoneNumber,
    FieldKey::Address,
    FieldKey::City,
    FieldKey::State,
    FieldKey::Country,
];

const EMPLOYMENT_REQUIRED: &[FieldKey] = &[
    FieldKey::Occupation,
    FieldKey::EmployerName,
    FieldKey::MonthlyIncome,
    FieldKey::SourceOfFunds,
];

const FINANCIAL_REQUIRED: &[FieldKey] = &[
    FieldKey::BankingHistory,
    FieldKey::CreditHistory,
    FieldKey::RiskTolerance,
    FieldKey::AccountPurpose,
];

const SECURITY_REQUIRED: &[FieldKey] = &[
    FieldKey::Pin,
    FieldKey::ConfirmPin,
    FieldKey::AgreeToTerms,
];

impl StepKind {
    /// Steps in the order the wizard presents them.
    pub const STANDARD_ORDER: [StepKind; 6] = [
        StepKind::Personal,
        StepKind::Identity,
        StepKind::Contact,
        StepKind::Employment,
        StepKind::FinancialProfile,
        StepKind::Security,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Personal => "Personal Information",
            StepKind::Identity => "Identity Verification",
            StepKind::Contact => "Contact & Address",
            StepKind::Employment => "Employment & Income",
            StepKind::FinancialProfile => "Financial Profile",
            StepKind::Security => "Security & Terms",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StepKind::Personal => "Tell us about yourself",
            StepKind::Identity => "Verify your identity with a government-issued document",
            StepKind::Contact => "How can we reach you?",
            StepKind::Employment => "Your employment and income details",
            StepKind::FinancialProfile => "Help us understand your financial needs",
            StepKind::Security => "Secure your account and review our terms",
        }
    }

    /// Fields that must be answered before leaving this step.
    pub fn required_fields(&self) -> &'static [FieldKey] {
        match self {
            StepKind::Personal => PERSONAL_REQUIRED,
            StepKind::Identity => IDENTITY_REQUIRED,
            StepKind::Contact => CONTACT_REQUIRED,
            StepKind::Employment => EMPLOYMENT_REQUIRED,
            StepKind::FinancialProfile => FINANCIAL_REQUIRED,
            StepKind::Security => SECURITY_REQUIRED,
        }
    }

    /// All fields rendered by this step, required or not.
    pub fn fields(&self) -> &'static [FieldKey] {
        use FieldKey::*;
        match self {
            StepKind::Personal => &[
                FullName,
                DateOfBirth,
                Gender,
                MaritalStatus,
                Nationality,
                PlaceOfBirth,
            ],
            StepKind::Identity => &[IdType, IdNumber, IssuingCountry, ExpiryDate],
            StepKind::Contact => &[
                PhoneNumber,
                Email,
                Address,
                City,
                State,
                PostalCode,
                Country,
                EmergencyContactName,
                EmergencyContactPhone,
                EmergencyContactRelationship,
            ],
            StepKind::Employment => &[
                Occupation,
                EmployerName,
                EmployerAddress,
                EmploymentType,
                MonthlyIncome,
                SourceOfFunds,
                AdditionalIncome,
            ],
            StepKind::FinancialProfile => &[
                BankingHistory,
                CreditHistory,
                InvestmentExperience,
                RiskTolerance,
                ExpectedTransactionVolume,
                AccountPurpose,
            ],
            StepKind::Security => &[
                Pin,
                ConfirmPin,
                SecurityQuestion1,
                SecurityAnswer1,
                SecurityQuestion2,
                SecurityAnswer2,
                AgreeToTerms,
                AgreeToMarketing,
                AgreeToDataProcessing,
            ],
        }
    }

    pub fn validator(&self) -> Validator {
        match self {
            StepKind::Personal => validate_personal,
            StepKind::Identity => validate_identity,
            StepKind::Contact => validate_contact,
            StepKind::Employment => validate_employment,
            StepKind::FinancialProfile => validate_financial_profile,
            StepKind::Security => validate_security,
        }
    }
}

fn validate_personal(data: &AccumulatedFormData) -> ValidationResult {
    require_fields(data, PERSONAL_REQUIRED)
}

fn validate_identity(data: &AccumulatedFormData) -> ValidationResult {
    require_fields(data, IDENTITY_REQUIRED)
}

fn validate_contact(data: &AccumulatedFormData) -> ValidationResult {
    require_fields(data, CONTACT_REQUIRED)
}

fn validate_employment(data: &AccumulatedFormData) -> ValidationResult {
    require_fields(data, EMPLOYMENT_REQUIRED)
}

fn validate_financial_profile(data: &AccumulatedFormData) -> ValidationResult {
    require_fields(data, FINANCIAL_REQUIRED)
}

/// One screen of the wizard.
///
/// Immutable once built; the index is the step's position in its registry.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub index: usize,
    pub kind: StepKind,
    pub title: &'static str,
    pub description: &'static str,
    pub required: &'static [FieldKey],
    validate: Validator,
}

impl StepDefinition {
    pub fn new(index: usize, kind: StepKind) -> Self {
        Self {
            index,
            kind,
            title: kind.title(),
            description: kind.description(),
            required: kind.required_fields(),
            validate: kind.validator(),
        }
    }

    pub fn validate(&self, data: &AccumulatedFormData) -> ValidationResult {
        (self.validate)(data)
    }
}
