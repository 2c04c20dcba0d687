use crate::account::{AccountCreationError, AccountHandle};

/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Validate the active step and move forward.
    ///
    /// 下一步。
    Next,
    /// Move to the previous step without validating.
    ///
    /// 返回。
    Back,
    /// Account creation succeeded (collaborator callback).
    ///
    /// 开户成功。
    SubmissionSucceeded { account: AccountHandle },
    /// Account creation failed (collaborator callback).
    ///
    /// 开户失败。
    SubmissionFailed { error: AccountCreationError },
    /// The applicant left the wizard.
    ///
    /// 放弃。
    Abandon,
}
