use serde::{Deserialize, Serialize};

use super::id_macro::impl_prefixed_id;

/// Identifier of an account opened by the onboarding flow.
///
/// Generated once per submission and reused on every retry, so the backend
/// can recognise a repeated request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl_prefixed_id!(AccountId => "acct");
