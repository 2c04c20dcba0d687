//! Security step: redacted secrets (transaction PIN, security answers) and the
//! finalizer that gates the terminal transition.

pub mod finalizer;
pub mod secret;

pub use finalizer::{
    validate_security, PIN_EMPTY_MESSAGE, PIN_LENGTH, PIN_LENGTH_MESSAGE, PIN_MISMATCH_MESSAGE,
    TERMS_MESSAGE,
};
pub use secret::{PinCode, SecretText};
