//! Transient user-facing notifications.
//!
//! The editor never renders anything itself; it hands `Notification`s to an
//! injected `Notifier` and forgets them.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// A single toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub(crate) fn empty_description() -> Self {
        Self::error("Error", "Please enter a scene description.")
    }

    pub(crate) fn scene_added() -> Self {
        Self::info("Success", "Scene added to storyboard successfully!")
    }

    pub(crate) fn generation_failed() -> Self {
        Self::error("Error", "Failed to generate scene. Please try again.")
    }

    pub(crate) fn scene_deleted() -> Self {
        Self::info(
            "Scene Deleted",
            "The scene has been removed from the storyboard.",
        )
    }

    pub(crate) fn exported() -> Self {
        Self::info(
            "Storyboard Exported",
            "Your storyboard has been exported as a text file.",
        )
    }
}

/// Fire-and-forget sink for notifications.
pub trait Notifier {
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

/// Sends notifications to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                tracing::info!(title = %notification.title, "{}", notification.message)
            }
            Severity::Error => {
                tracing::warn!(title = %notification.title, "{}", notification.message)
            }
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Removes and returns everything received so far.
    pub fn take(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_collects_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("a", "1"));
        notifier.notify(Notification::error("b", "2"));

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "a");
        assert_eq!(events[1].severity, Severity::Error);

        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.events().is_empty());
    }

    #[test]
    fn test_notifier_through_reference() {
        let notifier = RecordingNotifier::new();
        let by_ref: &dyn Notifier = &notifier;
        by_ref.notify(Notification::scene_deleted());
        assert_eq!(notifier.last().unwrap().title, "Scene Deleted");
    }
}
