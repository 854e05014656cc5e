//! Notification sink for the terminal

use std::io::Write;

use core_kernel::DomainPort;
use domain_claims::{Notification, NotificationSink, Severity};

/// Prints notifications to stderr so stdout stays free for run output
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotificationSink;

impl DomainPort for StderrNotificationSink {}

impl NotificationSink for StderrNotificationSink {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        // Ignored if stderr is closed
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

/// One-line form of a notification
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "[✓]",
        Severity::Destructive => "[!]",
    };
    format!("{marker} {}: {}", notification.title, notification.description)
}
