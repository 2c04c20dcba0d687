pub mod pin_hash;

pub use pin_hash::{hash_pin, verify_pin, EncodedPinHash};
