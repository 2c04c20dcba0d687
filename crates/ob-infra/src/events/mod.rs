//! Sinks for wizard state changes.

mod channel;
mod logging;

pub use channel::ChannelWizardEvents;
pub use logging::LoggingWizardEvents;
