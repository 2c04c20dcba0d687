use std::sync::Arc;

use ob_core::wizard::WizardState;
use tokio::sync::Mutex;

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole dispatch, including the account-creation call.
/// - `state`: held only for reads and writes of the snapshot, never across an await on I/O.
#[derive(Clone)]
pub struct WizardContext {
    /// Current wizard state.
    state: Arc<Mutex<WizardState>>,
    /// Serializes dispatch calls so transition + actions + state update run atomically.
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    /// Creates a new WizardContext with the given initial state.
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Snapshot of the current state.
    ///
    /// Does NOT acquire `dispatch_lock`, so it answers while a submission is in flight.
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Replaces the state.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: WizardState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new(WizardState::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ob_core::wizard::WizardPhase;

    #[tokio::test]
    async fn state_is_readable_while_dispatch_lock_is_held() {
        let context = WizardContext::default().arc();
        let _guard = context.acquire_dispatch_lock().await;

        let state = context.get_state().await;
        assert_eq!(state.phase, WizardPhase::Step(0));
    }

    #[tokio::test]
    async fn clones_share_the_same_state() {
        let context = WizardContext::default();
        let clone = context.clone();

        let mut next = WizardState::new();
        next.phase = WizardPhase::Step(2);
        clone.set_state(next).await;

        assert_eq!(context.get_state().await.phase, WizardPhase::Step(2));
    }
}
