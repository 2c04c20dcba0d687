use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FormError;

/// Government document accepted for identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    NationalId,
    Passport,
    DriversLicense,
    VotersCard,
    Nin,
}

impl IdType {
    pub const ALL: [IdType; 5] = [
        IdType::NationalId,
        IdType::Passport,
        IdType::DriversLicense,
        IdType::VotersCard,
        IdType::Nin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::NationalId => "national_id",
            IdType::Passport => "passport",
            IdType::DriversLicense => "drivers_license",
            IdType::VotersCard => "voters_card",
            IdType::Nin => "nin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdType::NationalId => "National ID Card",
            IdType::Passport => "International Passport",
            IdType::DriversLicense => "Driver's License",
            IdType::VotersCard => "Voter's Card",
            IdType::Nin => "NIN Slip",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = FormError;

    /// Accepts the snake_case key, case-insensitively, with `-` or space
    /// treated as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        IdType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| FormError::UnknownIdType(s.to_string()))
    }
}
