use super::{FieldKey, FieldKind};

/// Errors produced when writing a value into the accumulated record.
///
/// 表单写入错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {field} expects a {expected:?} value")]
    KindMismatch { field: FieldKey, expected: FieldKind },
    #[error("unsupported ID type: {0}")]
    UnknownIdType(String),
}
