use async_trait::async_trait;
use ob_core::ports::WizardEventPort;
use ob_core::WizardState;
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of states buffered per subscriber.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Fans wizard states out to any number of subscribers, e.g. a rendering task.
///
/// Slow subscribers lose the oldest states; only the latest one matters to a screen.
#[derive(Debug, Clone)]
pub struct ChannelWizardEvents {
    sender: broadcast::Sender<WizardState>,
}

impl ChannelWizardEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WizardState> {
        self.sender.subscribe()
    }
}

impl Default for ChannelWizardEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[async_trait]
impl WizardEventPort for ChannelWizardEvents {
    async fn emit_state_changed(&self, state: &WizardState) {
        // No subscribers is not an error.
        if self.sender.send(state.clone()).is_err() {
            trace!("wizard state dropped, no subscribers");
        }
    }
}
