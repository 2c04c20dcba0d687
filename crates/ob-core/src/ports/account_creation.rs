use async_trait::async_trait;

use crate::account::{AccountCreationError, AccountHandle};
use crate::form::AccumulatedFormData;
use crate::ids::AccountId;

/// Backend that opens the account once the wizard's last step validates.
#[async_trait]
pub trait AccountCreationPort: Send + Sync {
    /// Create an account from the full accumulated record.
    ///
    /// - One call per attempt; retries are the caller's policy
    /// - `account_id` is fixed for the whole submission and acts as the
    ///   idempotency key: repeating a call that already opened the account
    ///   returns the same handle instead of a duplicate error
    /// - Must not keep the raw PIN beyond the call
    async fn create_account(
        &self,
        account_id: &AccountId,
        data: &AccumulatedFormData,
    ) -> Result<AccountHandle, AccountCreationError>;
}

#[cfg(test)]
mockall::mock! {
    pub AccountCreation {}

    #[async_trait]
    impl AccountCreationPort for AccountCreation {
        async fn create_account(
            &self,
            account_id: &AccountId,
            data: &AccumulatedFormData,
        ) -> Result<AccountHandle, AccountCreationError>;
    }
}
