//! ID type wrappers for type safety.

mod id_macro;

pub mod account_id;

pub use account_id::AccountId;
