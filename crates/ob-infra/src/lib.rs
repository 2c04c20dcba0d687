//! Infrastructure adapters for the onboarding wizard.
//!
//! Implements the `ob-core` ports: the simulated account backend, the wizard
//! event sinks and the system clock.

pub mod account;
pub mod events;
pub mod time;

pub use account::SimulatedAccountService;
pub use events::{ChannelWizardEvents, LoggingWizardEvents};
pub use time::SystemClock;
