// PluginBridge - Carries events from the plugin to the host panel
//
// The host drains the receiving end on its own event loop. `post` never
// blocks: a full channel drops the event with a warning so a rename run is
// never held up by a slow panel. `deliver` waits for room and is reserved for
// events the panel must see, such as the outcome of a RENAME.

use crate::metrics::Metrics;
use crate::services::renamer::{FailureNotifier, RenameError};
use crate::ui::messages::{Notification, PluginEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default capacity of the panel event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Sending half of the plugin → panel channel.
///
/// Cheap to clone; every clone posts into the same channel.
///
/// # Example
/// ```ignore
/// let (bridge, mut events) = PluginBridge::new();
/// bridge.notify(Notification::info("Layers renamed"));
/// let event = events.recv().await;
/// ```
#[derive(Clone)]
pub struct PluginBridge {
    event_tx: mpsc::Sender<PluginEvent>,
    metrics: Arc<Metrics>,
}

impl PluginBridge {
    /// Create a bridge with the default channel capacity
    ///
    /// # Returns
    /// The bridge and the receiver the host drains
    pub fn new() -> (Self, mpsc::Receiver<PluginEvent>) {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<PluginEvent>) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let bridge = Self {
            event_tx,
            metrics: Arc::new(Metrics::new()),
        };
        (bridge, event_rx)
    }

    /// Share `metrics` with the rest of the plugin
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Post an event to the panel without waiting
    pub fn post(&self, event: PluginEvent) {
        match self.event_tx.try_send(event) {
            Ok(_) => {
                self.metrics.record_event_posted();
            }
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.metrics.record_event_channel_full();
                tracing::warn!("Panel event channel full - dropping {:?}", event);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Failed to post panel event - panel has closed");
            }
        }
    }

    /// Show a toast in the host
    pub fn notify(&self, notification: Notification) {
        self.post(PluginEvent::Notify(notification));
    }

    /// Send an event the panel must receive, waiting while the channel is full.
    ///
    /// Only fails when the panel has closed, which is logged and ignored.
    pub async fn deliver(&self, event: PluginEvent) {
        match self.event_tx.send(event).await {
            Ok(()) => {
                self.metrics.record_event_posted();
            }
            Err(_) => {
                tracing::warn!("Failed to deliver panel event - panel has closed");
            }
        }
    }
}

impl FailureNotifier for PluginBridge {
    fn node_failed(&self, error: &RenameError) {
        self.notify(Notification::error(error.to_string()));
    }
}
