use std::fmt;

use zeroize::Zeroize;

/// Free text the applicant typed that must never reach a log line.
///
/// 敏感文本（PIN、安全问题答案）：
/// - Debug / Display 不输出真实内容
/// - Drop 时清零内存
/// - 不参与序列化（由持有方 `#[serde(skip)]`）
///
/// Unlike a one-shot secret this value is `Clone`: the wizard keeps it in the
/// accumulated record across a failed submission so the applicant does not
/// have to retype it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretText {
    inner: String,
}

/// A transaction PIN as typed by the applicant.
pub type PinCode = SecretText;

impl SecretText {
    /// Create a new secret value.
    ///
    /// 创建敏感值。
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Borrow the raw value.
    ///
    /// 只允许通过借用方式读取。
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }

    /// Number of characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.inner.chars().count()
    }

    pub fn is_all_digits(&self) -> bool {
        !self.inner.is_empty() && self.inner.chars().all(|c| c.is_ascii_digit())
    }

    /// Overwrite the value, zeroizing the previous buffer first.
    pub fn replace(&mut self, value: impl Into<String>) {
        self.inner.zeroize();
        self.inner = value.into();
    }
}

impl fmt::Debug for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretText([REDACTED])")
    }
}

impl fmt::Display for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretText {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
