//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the
//! infrastructure that backs them. The wizard talks to exactly two things
//! outside itself: the account-creation backend and whoever renders its state.
//! Adapters additionally read the time through [`ClockPort`].

mod account_creation;
mod clock;
mod wizard_events;

pub use account_creation::AccountCreationPort;
pub use clock::ClockPort;
pub use wizard_events::WizardEventPort;

#[cfg(test)]
pub use account_creation::MockAccountCreation;
