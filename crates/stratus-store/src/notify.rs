//! Change notification for mutated resource identifiers.
//!
//! Observers subscribe to a broadcast channel and receive one
//! [`ChangeEvent`] per successful mutating gateway call, after the
//! write has committed. Delivery is fire-and-forget: a full or
//! observer-less channel never affects the write.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use stratus_types::ResourceUri;

/// A notification that data under an identifier changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The identifier the mutating call was addressed to.
    pub uri: ResourceUri,
}

/// Sender for change events.
pub type ChangeSender = broadcast::Sender<ChangeEvent>;

/// Receiver for change events.
pub type ChangeReceiver = broadcast::Receiver<ChangeEvent>;

/// Create a change channel with the given capacity.
pub fn change_channel(capacity: usize) -> (ChangeSender, ChangeReceiver) {
    broadcast::channel(capacity)
}

/// Dispatcher fanning change events out to all subscribers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: ChangeSender,
}

impl ChangeNotifier {
    /// Create a notifier with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = change_channel(capacity);
        Self { sender }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> ChangeReceiver {
        self.sender.subscribe()
    }

    /// Notify observers that the data under `uri` changed.
    ///
    /// Errors (no active subscribers) are ignored.
    pub fn notify(&self, uri: ResourceUri) {
        let _ = self.sender.send(ChangeEvent { uri });
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_events() {
        let notifier = ChangeNotifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify(ResourceUri::weather());

        let event = rx.try_recv().unwrap();
        assert_eq!(event.uri, ResourceUri::weather());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_notify_without_subscribers_is_harmless() {
        let notifier = ChangeNotifier::default();
        notifier.notify(ResourceUri::location());
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_see_the_event() {
        let notifier = ChangeNotifier::default();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.notify(ResourceUri::location());

        assert_eq!(a.try_recv().unwrap().uri, ResourceUri::location());
        assert_eq!(b.try_recv().unwrap().uri, ResourceUri::location());
    }

    #[test]
    fn test_event_serialization() {
        let event = ChangeEvent {
            uri: ResourceUri::weather_for_location("94043"),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ChangeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
