//! Accumulated form record.
//!
//! The record is flat: every step reads and writes the same value, addressed by
//! [`FieldKey`]. Grouping by step is a property of the step registry, not of the
//! storage.

mod data;
mod error;
mod field;
mod id_type;

pub use data::AccumulatedFormData;
pub use error::FormError;
pub use field::{FieldKey, FieldKind, FieldValue};
pub use id_type::IdType;
