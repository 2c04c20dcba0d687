use std::sync::Arc;
use std::time::Duration;

use ob_core::config::SubmissionConfig;
use ob_core::form::AccumulatedFormData;
use ob_core::ports::AccountCreationPort;
use ob_core::{AccountCreationError, AccountHandle, AccountId};
use tracing::{debug, info, warn};

/// Timeout and retry policy for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl SubmissionPolicy {
    /// Attempts actually made; at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self::from(&SubmissionConfig::default())
    }
}

impl From<&SubmissionConfig> for SubmissionPolicy {
    fn from(config: &SubmissionConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_attempts: config.max_attempts,
            backoff: config.retry_backoff(),
        }
    }
}

/// Use case for opening the account once the wizard has validated.
///
/// Each attempt is bounded by `policy.timeout`; transient failures are
/// retried up to `policy.max_attempts` with linear backoff. Identity and
/// document rejections are final.
///
/// One [`AccountId`] is generated per submission and sent with every attempt,
/// so an attempt that timed out after the backend opened the account is
/// answered with that account on retry.
pub struct CreateAccount {
    accounts: Arc<dyn AccountCreationPort>,
    policy: SubmissionPolicy,
}

impl CreateAccount {
    pub fn new(accounts: Arc<dyn AccountCreationPort>, policy: SubmissionPolicy) -> Self {
        Self { accounts, policy }
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    pub async fn execute(
        &self,
        data: &AccumulatedFormData,
    ) -> Result<AccountHandle, AccountCreationError> {
        let attempts = self.policy.attempts();
        let account_id = AccountId::new();
        let mut attempt = 1;
        loop {
            debug!(%account_id, attempt, attempts, "creating account");
            let error = match tokio::time::timeout(
                self.policy.timeout,
                self.accounts.create_account(&account_id, data),
            )
            .await
            {
                Ok(Ok(account)) => {
                    info!(account_id = %account.account_id, attempt, "account created");
                    return Ok(account);
                }
                Ok(Err(error)) => error,
                Err(_elapsed) => AccountCreationError::Timeout {
                    after_ms: self.policy.timeout.as_millis() as u64,
                },
            };

            if !error.is_retryable() || attempt >= attempts {
                warn!(error = %error, attempt, "account creation failed");
                return Err(error);
            }

            let delay = self.policy.backoff * attempt;
            warn!(
                error = %error,
                attempt,
                retry_in_ms = delay.as_millis() as u64,
                "account creation attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::time::Instant;

    /// Replays scripted outcomes; `None` means "hang".
    struct ScriptedAccounts {
        outcomes: StdMutex<VecDeque<Option<Result<AccountHandle, AccountCreationError>>>>,
        keys: StdMutex<Vec<AccountId>>,
    }

    impl ScriptedAccounts {
        fn new(
            outcomes: Vec<Option<Result<AccountHandle, AccountCreationError>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                outcomes: StdMutex::new(outcomes.into()),
                keys: StdMutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> u32 {
            self.keys.lock().unwrap().len() as u32
        }

        fn keys(&self) -> Vec<AccountId> {
            self.keys.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccountCreationPort for ScriptedAccounts {
        async fn create_account(
            &self,
            account_id: &AccountId,
            _data: &AccumulatedFormData,
        ) -> Result<AccountHandle, AccountCreationError> {
            self.keys.lock().unwrap().push(account_id.clone());
            let next = self.outcomes.lock().unwrap().pop_front();
            match next {
                Some(Some(outcome)) => outcome,
                Some(None) | None => std::future::pending().await,
            }
        }
    }

    fn handle() -> AccountHandle {
        AccountHandle::new(AccountId::new(), Utc::now())
    }

    fn policy(max_attempts: u32) -> SubmissionPolicy {
        SubmissionPolicy {
            timeout: Duration::from_secs(5),
            max_attempts,
            backoff: Duration::from_millis(100),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_is_returned_without_retry() {
        let account = handle();
        let accounts = ScriptedAccounts::new(vec![Some(Ok(account.clone()))]);
        let use_case = CreateAccount::new(accounts.clone(), policy(3));

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert_eq!(result, Ok(account));
        assert_eq!(accounts.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_with_linear_backoff() {
        let account = handle();
        let accounts = ScriptedAccounts::new(vec![
            Some(Err(AccountCreationError::Network("reset".into()))),
            Some(Err(AccountCreationError::Server("502".into()))),
            Some(Ok(account.clone())),
        ]);
        let use_case = CreateAccount::new(accounts.clone(), policy(3));
        let started = Instant::now();

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert_eq!(result, Ok(account));
        assert_eq!(accounts.calls(), 3);
        // 100ms after the first failure, 200ms after the second.
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(300), "waited {waited:?}");
        assert!(waited < Duration::from_secs(1), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_failure_is_not_retried() {
        let accounts = ScriptedAccounts::new(vec![
            Some(Err(AccountCreationError::DuplicateIdentity)),
            Some(Ok(handle())),
        ]);
        let use_case = CreateAccount::new(accounts.clone(), policy(3));

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert_eq!(result, Err(AccountCreationError::DuplicateIdentity));
        assert_eq!(accounts.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_backend_times_out_after_each_attempt() {
        let accounts = ScriptedAccounts::new(vec![None, None]);
        let use_case = CreateAccount::new(accounts.clone(), policy(2));

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert_eq!(result, Err(AccountCreationError::Timeout { after_ms: 5_000 }));
        assert_eq!(accounts.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_timeout_reuses_the_account_id() {
        let account = handle();
        let accounts = ScriptedAccounts::new(vec![None, Some(Ok(account.clone()))]);
        let use_case = CreateAccount::new(accounts.clone(), policy(3));

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert_eq!(result, Ok(account));
        let keys = accounts.keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], keys[1]);
        assert!(keys[0].has_expected_prefix());
    }

    #[tokio::test(start_paused = true)]
    async fn each_submission_gets_its_own_account_id() {
        let accounts =
            ScriptedAccounts::new(vec![Some(Ok(handle())), Some(Ok(handle()))]);
        let use_case = CreateAccount::new(accounts.clone(), policy(1));

        use_case.execute(&AccumulatedFormData::default()).await.unwrap();
        use_case.execute(&AccumulatedFormData::default()).await.unwrap();

        let keys = accounts.keys();
        assert_ne!(keys[0], keys[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_calls_once() {
        let accounts = ScriptedAccounts::new(vec![Some(Err(AccountCreationError::Network(
            "down".into(),
        )))]);
        let use_case = CreateAccount::new(accounts.clone(), policy(0));

        let result = use_case.execute(&AccumulatedFormData::default()).await;

        assert!(matches!(result, Err(AccountCreationError::Network(_))));
        assert_eq!(accounts.calls(), 1);
    }

    #[test]
    fn policy_follows_config() {
        let config = SubmissionConfig {
            timeout_ms: 1_500,
            max_attempts: 4,
            retry_backoff_ms: 50,
        };
        let policy = SubmissionPolicy::from(&config);
        assert_eq!(policy.timeout, Duration::from_millis(1_500));
        assert_eq!(policy.attempts(), 4);
        assert_eq!(policy.backoff, Duration::from_millis(50));
    }
}
