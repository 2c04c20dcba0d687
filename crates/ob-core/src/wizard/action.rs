use crate::account::AccountHandle;

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Call the account-creation collaborator with the accumulated record.
    ///
    /// 调用开户服务。
    CreateAccount,
    /// Tell the calling screen the account exists (it redirects).
    ///
    /// 通知调用方开户完成。
    NotifyCompleted { account: AccountHandle },
    /// The wizard was abandoned; any copies of entered data should be dropped.
    ///
    /// 丢弃已录入数据。
    DiscardData,
}
