//! User-visible notifications (toasts).
//!
//! Fire-and-forget: the cart never learns whether a notification was shown.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
}

/// A short-lived message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// A success-styled notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// An informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// Presenter for notifications.
pub trait Notifier {
    /// Show a notification. Must not block and cannot fail.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(style = ?notification.level, "{}", notification.message);
    }
}

/// Keeps every notification in a shared buffer.
///
/// Clones share the buffer, so one clone can be handed to the store while
/// another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Just the messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.message).collect()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clones_share_buffer() {
        let recorder = RecordingNotifier::new();
        let handle = recorder.clone();

        recorder.notify(Notification::success("Cart cleared"));
        assert_eq!(handle.messages(), vec!["Cart cleared"]);

        let drained = handle.drain();
        assert_eq!(drained.len(), 1);
        assert!(recorder.notifications().is_empty());
    }

    #[test]
    fn test_notifier_by_reference() {
        let recorder = RecordingNotifier::new();
        let by_ref: &RecordingNotifier = &recorder;
        by_ref.notify(Notification::info("hello"));
        assert_eq!(recorder.notifications()[0].level, NotificationLevel::Info);
    }

    #[test]
    fn test_noop_accepts_anything() {
        NoopNotifier.notify(Notification::success("ignored"));
    }
}
