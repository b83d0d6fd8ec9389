//! Parse notification / diagnostic system.
//!
//! Drawing text is noisy by nature, so almost nothing encountered while
//! scanning is fatal. Non-fatal issues are collected as `Notification` items
//! rather than being silently dropped or causing hard errors.
//!
//! After a takeoff the caller can inspect [`crate::Takeoff::notifications`]
//! to see what was skipped.

use serde::Serialize;
use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationType {
    /// A code/value pair could not be parsed and was skipped.
    MalformedTagPair,
    /// An annotation matched no recognizer.
    UnrecognizedAnnotation,
    /// A callout matched but its diameter is outside the plausible range.
    DiameterOutOfRange,
    /// A callout matched but carried a zero count or spacing.
    DegenerateCallout,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTagPair => write!(f, "MalformedTagPair"),
            Self::UnrecognizedAnnotation => write!(f, "UnrecognizedAnnotation"),
            Self::DiameterOutOfRange => write!(f, "DiameterOutOfRange"),
            Self::DegenerateCallout => write!(f, "DegenerateCallout"),
        }
    }
}

/// A single notification produced during a takeoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during a takeoff.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    /// Move every notification of `other` into this collection.
    pub fn append(&mut self, other: &mut NotificationCollection) {
        self.items.append(&mut other.items);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
