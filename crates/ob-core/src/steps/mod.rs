//! Step registry.
//!
//! An ordered, immutable list of step definitions. The registry is
//! configuration, not runtime state: nothing mutates it after construction.

mod definition;
mod registry;

pub use definition::{StepDefinition, StepKind};
pub use registry::{OutOfRangeError, RegistryError, StepRegistry};
