//! Account onboarding wizard: bootstrap and command-line driver.
//!
//! The wizard itself lives in the workspace crates; this crate loads
//! configuration, installs tracing, wires the adapters and replays an
//! applicant profile through the wizard.

pub mod bootstrap;
pub mod profile;
