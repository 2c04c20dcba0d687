use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use ob_app::usecases::onboarding::WizardContext;
use ob_app::{CreateAccount, OnboardingError, OnboardingOrchestrator, SubmissionPolicy};
use ob_core::ports::{AccountCreationPort, WizardEventPort};
use ob_core::security::PinCode;
use ob_core::validation::ValidationCode;
use ob_core::wizard::SUBMISSION_FAILED_MESSAGE;
use ob_core::{
    AccountCreationError, AccountCreationFailureKind, AccountHandle, AccountId,
    AccumulatedFormData, FieldKey, StepError, StepRegistry, WizardPhase, WizardState,
};
use tokio::sync::Notify;

mock! {
    pub Accounts {}

    #[async_trait]
    impl AccountCreationPort for Accounts {
        async fn create_account(
            &self,
            account_id: &AccountId,
            data: &AccumulatedFormData,
        ) -> Result<AccountHandle, AccountCreationError>;
    }
}

#[derive(Default)]
struct RecordingEvents {
    states: Mutex<Vec<WizardState>>,
}

impl RecordingEvents {
    fn phases(&self) -> Vec<WizardPhase> {
        self.states.lock().unwrap().iter().map(|s| s.phase).collect()
    }
}

#[async_trait]
impl WizardEventPort for RecordingEvents {
    async fn emit_state_changed(&self, state: &WizardState) {
        self.states.lock().unwrap().push(state.clone());
    }
}

/// Parks every call until released, so tests can act mid-submission.
struct GatedAccounts {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedAccounts {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AccountCreationPort for GatedAccounts {
    async fn create_account(
        &self,
        account_id: &AccountId,
        _data: &AccumulatedFormData,
    ) -> Result<AccountHandle, AccountCreationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(AccountHandle::new(account_id.clone(), Utc::now()))
    }
}

fn fast_policy() -> SubmissionPolicy {
    SubmissionPolicy {
        timeout: Duration::from_secs(5),
        max_attempts: 3,
        backoff: Duration::from_millis(1),
    }
}

fn build_orchestrator(
    accounts: Arc<dyn AccountCreationPort>,
    initial: WizardState,
) -> (Arc<OnboardingOrchestrator>, Arc<RecordingEvents>) {
    let events = Arc::new(RecordingEvents::default());
    let orchestrator = OnboardingOrchestrator::with_context(
        Arc::new(StepRegistry::standard()),
        WizardContext::new(initial).arc(),
        Arc::new(CreateAccount::new(accounts, fast_policy())),
        events.clone(),
    );
    (Arc::new(orchestrator), events)
}

fn complete_profile() -> AccumulatedFormData {
    let mut data = AccumulatedFormData::new();
    for (key, value) in [
        (FieldKey::FullName, "Tunde Bakare"),
        (FieldKey::DateOfBirth, "1988-02-14"),
        (FieldKey::Gender, "male"),
        (FieldKey::Nationality, "Nigerian"),
        (FieldKey::IdType, "nin"),
        (FieldKey::IdNumber, "12345678901"),
        (FieldKey::IssuingCountry, "Nigeria"),
        (FieldKey::ExpiryDate, "2099-01-31"),
        (FieldKey::PhoneNumber, "+2348020000000"),
        (FieldKey::Address, "12 Marina Road"),
        (FieldKey::City, "Lagos"),
        (FieldKey::State, "Lagos"),
        (FieldKey::Country, "Nigeria"),
        (FieldKey::Occupation, "Engineer"),
        (FieldKey::EmployerName, "Acme Ltd"),
        (FieldKey::MonthlyIncome, "500000+"),
        (FieldKey::SourceOfFunds, "salary"),
        (FieldKey::BankingHistory, "5+ years"),
        (FieldKey::CreditHistory, "good"),
        (FieldKey::RiskTolerance, "moderate"),
        (FieldKey::AccountPurpose, "savings"),
        (FieldKey::Pin, "1234"),
        (FieldKey::ConfirmPin, "1234"),
    ] {
        data.set_field(key, value).unwrap();
    }
    data.set_field(FieldKey::AgreeToTerms, true).unwrap();
    data
}

fn on_security_step(data: AccumulatedFormData) -> WizardState {
    let mut state = WizardState::with_data(data);
    state.phase = WizardPhase::Step(5);
    state
}

async fn press_next(orchestrator: &OnboardingOrchestrator, times: usize) -> WizardState {
    let mut state = orchestrator.get_state().await;
    for _ in 0..times {
        state = orchestrator.next().await.expect("next");
    }
    state
}

#[tokio::test]
async fn six_valid_steps_create_exactly_one_account() {
    let mut accounts = MockAccounts::new();
    accounts
        .expect_create_account()
        .times(1)
        .returning(|account_id, data| {
            assert_eq!(data.full_name, "Tunde Bakare");
            assert_eq!(data.pin.expose(), "1234");
            Ok(AccountHandle::new(account_id.clone(), Utc::now()))
        });
    let (orchestrator, events) =
        build_orchestrator(Arc::new(accounts), WizardState::with_data(complete_profile()));

    let state = press_next(&orchestrator, 6).await;

    assert_eq!(state.phase, WizardPhase::Completed);
    assert!(state.error.is_none());
    assert!(state
        .account
        .as_ref()
        .is_some_and(|account| account.account_id.has_expected_prefix()));
    assert_eq!(
        events.phases(),
        vec![
            WizardPhase::Step(1),
            WizardPhase::Step(2),
            WizardPhase::Step(3),
            WizardPhase::Step(4),
            WizardPhase::Step(5),
            WizardPhase::Submitting,
            WizardPhase::Completed,
        ]
    );
}

#[tokio::test]
async fn every_step_blocks_until_its_required_fields_are_filled() {
    let accounts = MockAccounts::new();
    let (orchestrator, _) = build_orchestrator(Arc::new(accounts), WizardState::new());
    let profile = complete_profile();

    for (index, step) in StepRegistry::standard().steps().enumerate() {
        let state = orchestrator.next().await.unwrap();
        assert_eq!(state.phase, WizardPhase::Step(index));
        assert!(state.error.is_some(), "step {index} advanced while empty");

        for key in step.required {
            match profile.flag(*key) {
                Some(flag) => orchestrator.update_field(*key, flag).await.unwrap(),
                None => {
                    let value = match key {
                        FieldKey::Pin | FieldKey::ConfirmPin => "1234".to_string(),
                        FieldKey::IdType => "nin".to_string(),
                        _ => profile.text(*key).unwrap_or_default().to_string(),
                    };
                    orchestrator.update_field(*key, value).await.unwrap()
                }
            };
        }

        if index < 5 {
            let state = orchestrator.next().await.unwrap();
            assert_eq!(state.phase, WizardPhase::Step(index + 1));
            assert!(state.error.is_none());
        }
    }
}

#[tokio::test]
async fn security_errors_are_reported_in_order() {
    let accounts = MockAccounts::new();
    let mut data = complete_profile();
    data.pin = PinCode::new("12");
    data.confirm_pin = PinCode::new("34");
    data.agree_to_terms = false;
    let (orchestrator, _) = build_orchestrator(Arc::new(accounts), on_security_step(data));

    let code = |state: &WizardState| {
        state
            .error
            .as_ref()
            .and_then(StepError::as_validation)
            .map(|failure| failure.code)
    };

    let state = orchestrator.next().await.unwrap();
    assert_eq!(code(&state), Some(ValidationCode::PinMismatch));

    orchestrator.update_field(FieldKey::ConfirmPin, "12").await.unwrap();
    let state = orchestrator.next().await.unwrap();
    assert_eq!(code(&state), Some(ValidationCode::PinLength));

    orchestrator.update_field(FieldKey::Pin, "1234").await.unwrap();
    orchestrator.update_field(FieldKey::ConfirmPin, "1234").await.unwrap();
    let state = orchestrator.next().await.unwrap();
    assert_eq!(code(&state), Some(ValidationCode::TermsNotAccepted));
    assert_eq!(state.phase, WizardPhase::Step(5));
}

#[tokio::test]
async fn failed_submission_keeps_data_and_allows_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut accounts = MockAccounts::new();
    accounts
        .expect_create_account()
        .times(2)
        .returning(move |_, _| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AccountCreationError::DuplicateIdentity)
            } else {
                Ok(AccountHandle::new(AccountId::new(), Utc::now()))
            }
        });
    let (orchestrator, _) =
        build_orchestrator(Arc::new(accounts), on_security_step(complete_profile()));

    let state = orchestrator.next().await.unwrap();
    assert_eq!(state.phase, WizardPhase::Step(5));
    assert_eq!(state.error_message(), Some(SUBMISSION_FAILED_MESSAGE));
    assert_eq!(
        state.error,
        Some(StepError::Submission {
            kind: AccountCreationFailureKind::DuplicateIdentity,
            message: SUBMISSION_FAILED_MESSAGE.to_string(),
        })
    );
    assert_eq!(state.data, complete_profile());

    let state = orchestrator.next().await.unwrap();
    assert_eq!(state.phase, WizardPhase::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn transient_failures_are_retried_within_one_press() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut accounts = MockAccounts::new();
    accounts
        .expect_create_account()
        .times(3)
        .returning(move |_, _| match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Err(AccountCreationError::Network("connection reset".into())),
            1 => Err(AccountCreationError::Server("502".into())),
            _ => Ok(AccountHandle::new(AccountId::new(), Utc::now())),
        });
    let (orchestrator, _) =
        build_orchestrator(Arc::new(accounts), on_security_step(complete_profile()));

    let state = orchestrator.next().await.unwrap();

    assert_eq!(state.phase, WizardPhase::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn requests_during_submission_are_rejected() {
    let accounts = GatedAccounts::new();
    let (orchestrator, _) =
        build_orchestrator(accounts.clone(), on_security_step(complete_profile()));

    let submitting = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.next().await })
    };
    accounts.entered.notified().await;

    assert!(orchestrator.get_state().await.is_submitting());
    assert_eq!(
        orchestrator.next().await,
        Err(OnboardingError::SubmissionInFlight)
    );
    assert_eq!(
        orchestrator.back().await,
        Err(OnboardingError::SubmissionInFlight)
    );
    assert_eq!(
        orchestrator.abandon().await,
        Err(OnboardingError::SubmissionInFlight)
    );
    assert_eq!(
        orchestrator.update_field(FieldKey::City, "Abuja").await,
        Err(OnboardingError::SubmissionInFlight)
    );

    accounts.release.notify_one();
    let state = submitting.await.unwrap().unwrap();

    assert_eq!(state.phase, WizardPhase::Completed);
    assert_eq!(state.data.city, "Lagos");
    assert_eq!(accounts.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn back_keeps_entered_data_and_stops_at_first_step() {
    let accounts = MockAccounts::new();
    let (orchestrator, _) =
        build_orchestrator(Arc::new(accounts), WizardState::with_data(complete_profile()));
    press_next(&orchestrator, 3).await;

    for expected in [2, 1, 0, 0] {
        let state = orchestrator.back().await.unwrap();
        assert_eq!(state.phase, WizardPhase::Step(expected));
    }
    assert_eq!(orchestrator.get_state().await.data, complete_profile());
}

#[tokio::test]
async fn abandoned_wizard_is_closed() {
    let accounts = MockAccounts::new();
    let (orchestrator, events) =
        build_orchestrator(Arc::new(accounts), WizardState::with_data(complete_profile()));

    let state = orchestrator.abandon().await.unwrap();
    assert_eq!(state.phase, WizardPhase::Abandoned);
    assert_eq!(state.data, AccumulatedFormData::default());

    assert_eq!(
        orchestrator.update_field(FieldKey::FullName, "x").await,
        Err(OnboardingError::WizardClosed)
    );
    assert_eq!(
        orchestrator.next().await.unwrap().phase,
        WizardPhase::Abandoned
    );
    assert_eq!(events.phases().first(), Some(&WizardPhase::Abandoned));
}
