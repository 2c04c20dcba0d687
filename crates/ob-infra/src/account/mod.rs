//! Account-creation adapters.

mod simulated;

pub use simulated::SimulatedAccountService;
