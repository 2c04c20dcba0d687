//! Common macro for implementing prefixed ID wrapper types.
//!
//! Generated ids look like `{prefix}_{uuid-simple}`, e.g. `acct_4f0c…`.

macro_rules! impl_prefixed_id {
    ($($name:ident => $prefix:literal),* $(,)?) => {
        $(
            impl $name {
                pub const PREFIX: &'static str = $prefix;

                pub fn new() -> Self {
                    Self(format!("{}_{}", $prefix, uuid::Uuid::new_v4().simple()))
                }

                pub fn from_string(s: String) -> Self {
                    Self(s)
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }

                /// Whether the id carries this type's prefix.
                pub fn has_expected_prefix(&self) -> bool {
                    self.0
                        .strip_prefix($prefix)
                        .map(|rest| rest.starts_with('_'))
                        .unwrap_or(false)
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

pub(crate) use impl_prefixed_id;
