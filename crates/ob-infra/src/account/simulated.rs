//! In-memory stand-in for the core-banking account service.
//!
//! Every call waits a fixed latency, then applies the checks a real backend
//! would make on the identity document before opening the account. The PIN is
//! kept only as an Argon2id hash.
//!
//! The caller's account id is the idempotency key: a repeated request for a
//! document already opened under that id returns the existing account.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use ob_core::config::SimulationConfig;
use ob_core::crypto::{hash_pin, verify_pin};
use ob_core::ports::{AccountCreationPort, ClockPort};
use ob_core::security::PinCode;
use ob_core::{
    AccountCreationError, AccountCreationFailureKind, AccountHandle, AccountId,
    AccumulatedFormData, IdType,
};
use tokio::sync::Mutex;
use tokio::task::spawn_blocking;
use tracing::{debug, info, warn};

/// Date format expected in `expiry_date`.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

type IdentityKey = (IdType, String);

#[derive(Debug, Clone)]
struct AccountRecord {
    account_id: AccountId,
    full_name: String,
    pin_hash: Vec<u8>,
    created_at: DateTime<Utc>,
}

pub struct SimulatedAccountService {
    config: SimulationConfig,
    clock: Arc<dyn ClockPort>,
    directory: Mutex<HashMap<IdentityKey, AccountRecord>>,
}

impl SimulatedAccountService {
    pub fn new(config: SimulationConfig, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            config,
            clock,
            directory: Mutex::new(HashMap::new()),
        }
    }

    /// Number of accounts opened so far.
    pub async fn account_count(&self) -> usize {
        self.directory.lock().await.len()
    }

    /// Check a PIN against the stored hash of the account opened for this document.
    ///
    /// Returns `Ok(false)` when no such account exists.
    pub async fn verify_account_pin(
        &self,
        id_type: IdType,
        id_number: &str,
        pin: &PinCode,
    ) -> anyhow::Result<bool> {
        let directory = self.directory.lock().await;
        let Some(record) = directory.get(&identity_key(id_type, id_number)) else {
            return Ok(false);
        };
        verify_pin(pin, &record.pin_hash)
            .with_context(|| format!("failed to verify PIN for account {}", record.account_id))
    }

    fn forced_error(&self, kind: AccountCreationFailureKind) -> AccountCreationError {
        match kind {
            AccountCreationFailureKind::DuplicateIdentity => {
                AccountCreationError::DuplicateIdentity
            }
            AccountCreationFailureKind::InvalidDocument => AccountCreationError::InvalidDocument {
                reason: "document rejected by simulation".to_string(),
            },
            AccountCreationFailureKind::Network => {
                AccountCreationError::Network("simulated connection reset".to_string())
            }
            AccountCreationFailureKind::Timeout => AccountCreationError::Timeout {
                after_ms: self.config.latency_ms,
            },
            AccountCreationFailureKind::Server => {
                AccountCreationError::Server("simulated internal error".to_string())
            }
        }
    }

    fn check_document(&self, data: &AccumulatedFormData) -> Result<IdType, AccountCreationError> {
        let id_type = data
            .id_type
            .ok_or_else(|| AccountCreationError::InvalidDocument {
                reason: "identity document type is missing".to_string(),
            })?;

        let expiry = NaiveDate::parse_from_str(data.expiry_date.trim(), EXPIRY_DATE_FORMAT)
            .map_err(|_| AccountCreationError::InvalidDocument {
                reason: format!(
                    "expiry date '{}' is not in YYYY-MM-DD form",
                    data.expiry_date.trim()
                ),
            })?;
        let today = self.clock.now().date_naive();
        if expiry < today {
            return Err(AccountCreationError::InvalidDocument {
                reason: format!("identity document expired on {expiry}"),
            });
        }

        Ok(id_type)
    }
}

fn identity_key(id_type: IdType, id_number: &str) -> IdentityKey {
    let normalized: String = id_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    (id_type, normalized)
}

/// The account already opened for `key` if it was opened under `account_id`.
///
/// A different id on the same document is a duplicate application.
fn replay(
    directory: &HashMap<IdentityKey, AccountRecord>,
    key: &IdentityKey,
    account_id: &AccountId,
) -> Option<Result<AccountHandle, AccountCreationError>> {
    let record = directory.get(key)?;
    if record.account_id == *account_id {
        debug!(%account_id, "repeated request, returning existing account");
        Some(Ok(AccountHandle::new(
            record.account_id.clone(),
            record.created_at,
        )))
    } else {
        warn!(id_type = %key.0.as_str(), "identity already has an account");
        Some(Err(AccountCreationError::DuplicateIdentity))
    }
}

#[async_trait]
impl AccountCreationPort for SimulatedAccountService {
    async fn create_account(
        &self,
        account_id: &AccountId,
        data: &AccumulatedFormData,
    ) -> Result<AccountHandle, AccountCreationError> {
        let latency = self.config.latency();
        if !latency.is_zero() {
            debug!(latency_ms = self.config.latency_ms, "simulating backend latency");
            tokio::time::sleep(latency).await;
        }

        if let Some(kind) = self.config.force_failure {
            warn!(kind = ?kind, "simulated account creation failure");
            return Err(self.forced_error(kind));
        }

        let id_type = self.check_document(data)?;
        let key = identity_key(id_type, &data.id_number);

        if let Some(outcome) = replay(&*self.directory.lock().await, &key, account_id) {
            return outcome;
        }

        let pin = data.pin.clone();
        let pin_hash = spawn_blocking(move || hash_pin(&pin))
            .await
            .map_err(|e| AccountCreationError::Server(format!("PIN hashing task failed: {e}")))?
            .map_err(|e| AccountCreationError::Server(format!("failed to hash PIN: {e}")))?;

        // Re-checked: another call may have opened the account while hashing.
        let mut directory = self.directory.lock().await;
        if let Some(outcome) = replay(&directory, &key, account_id) {
            return outcome;
        }

        let record = AccountRecord {
            account_id: account_id.clone(),
            full_name: data.full_name.trim().to_string(),
            pin_hash,
            created_at: self.clock.now(),
        };
        let handle = AccountHandle::new(record.account_id.clone(), record.created_at);
        info!(
            account_id = %record.account_id,
            holder = %record.full_name,
            id_type = %id_type.as_str(),
            "simulated account opened"
        );
        directory.insert(key, record);

        Ok(handle)
    }
}
