//! Recording notification sink

use std::sync::Mutex;

use core_kernel::DomainPort;
use domain_claims::{Notification, NotificationSink, Severity};

/// Keeps every notification it receives, in order
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().expect("notification log poisoned").clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications().into_iter().map(|n| n.title).collect()
    }

    pub fn count_with_title(&self, title: &str) -> usize {
        self.notifications().iter().filter(|n| n.title == title).count()
    }

    pub fn destructive_count(&self) -> usize {
        self.notifications()
            .iter()
            .filter(|n| n.severity == Severity::Destructive)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications().is_empty()
    }
}

impl DomainPort for RecordingNotificationSink {}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .expect("notification log poisoned")
            .push(notification);
    }
}
