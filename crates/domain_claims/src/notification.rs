//! User-facing notifications
//!
//! Short toast-style messages raised when documents are accepted, when a
//! request is made without documents, and when a run completes. They carry
//! no state the workflow depends on.

use serde::{Deserialize, Serialize};

use core_kernel::DomainPort;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    /// Rejected action
    Destructive,
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Raised when documents are added to the queue
    pub fn documents_uploaded(count: usize) -> Self {
        Self::new(
            "Files uploaded successfully",
            format!("{count} file(s) added to processing queue"),
            Severity::Success,
        )
    }

    /// Raised when a request is made with an empty queue
    pub fn no_documents() -> Self {
        Self::new(
            "No files uploaded",
            "Please upload claims documents first",
            Severity::Destructive,
        )
    }

    /// Raised after the last step of a run completes
    pub fn processing_completed() -> Self {
        Self::new(
            "Processing completed",
            "All workflow steps have been completed successfully",
            Severity::Success,
        )
    }
}

/// Port receiving notifications
///
/// The runner never holds its state lock while notifying, so a sink may
/// query the runner that raised the notice.
pub trait NotificationSink: DomainPort {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl DomainPort for TracingNotificationSink {}

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Destructive => tracing::warn!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            Severity::Success => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }
    }
}
