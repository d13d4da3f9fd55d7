//! Notification hub - fan-out of domain events to connected listeners.
//!
//! Delivery is best effort. A send with no listeners, or a listener that
//! falls behind, never reports back to the code that raised the event.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::NOTIFICATION_BUFFER_SIZE;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fire-and-forget notification capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, event_type: &str, payload: &str);
}

/// Event delivered to hub subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: String,
}

/// In-process hub backed by a tokio broadcast channel
#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<HubEvent>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::with_capacity(NOTIFICATION_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a listener. Only events sent after this call are received.
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationHub {
    fn notify(&self, event_type: &str, payload: &str) {
        let event = HubEvent {
            event_type: event_type.to_string(),
            payload: payload.to_string(),
        };

        match self.sender.send(event) {
            Ok(listeners) => tracing::debug!(event_type, listeners, "event broadcast"),
            Err(_) => tracing::debug!(event_type, "event dropped, no listeners"),
        }
    }
}
