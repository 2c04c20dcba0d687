//! Account-creation contract.
//!
//! The wizard's only outbound call. The backend is abstract; these types are
//! what the wizard needs to know about its answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AccountId;

/// Opaque handle for a freshly opened account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHandle {
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl AccountHandle {
    pub fn new(account_id: AccountId, created_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            created_at,
        }
    }
}

/// Why account creation failed.
///
/// 开户失败原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AccountCreationError {
    #[error("an account already exists for this identity")]
    DuplicateIdentity,
    #[error("identity document rejected: {reason}")]
    InvalidDocument { reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("account service did not answer within {after_ms} ms")]
    Timeout { after_ms: u64 },
    #[error("account service error: {0}")]
    Server(String),
}

impl AccountCreationError {
    /// Transient failures worth another attempt with the same data.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AccountCreationError::Network(_)
                | AccountCreationError::Timeout { .. }
                | AccountCreationError::Server(_)
        )
    }

    pub fn kind(&self) -> AccountCreationFailureKind {
        match self {
            AccountCreationError::DuplicateIdentity => AccountCreationFailureKind::DuplicateIdentity,
            AccountCreationError::InvalidDocument { .. } => {
                AccountCreationFailureKind::InvalidDocument
            }
            AccountCreationError::Network(_) => AccountCreationFailureKind::Network,
            AccountCreationError::Timeout { .. } => AccountCreationFailureKind::Timeout,
            AccountCreationError::Server(_) => AccountCreationFailureKind::Server,
        }
    }
}

/// Payload-free discriminant of [`AccountCreationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCreationFailureKind {
    DuplicateIdentity,
    InvalidDocument,
    Network,
    Timeout,
    Server,
}

impl std::str::FromStr for AccountCreationFailureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duplicate" | "duplicate_identity" => Ok(Self::DuplicateIdentity),
            "invalid_document" => Ok(Self::InvalidDocument),
            "network" => Ok(Self::Network),
            "timeout" => Ok(Self::Timeout),
            "server" => Ok(Self::Server),
            other => Err(format!("unknown failure kind: {other}")),
        }
    }
}
