//! Tweet notifications and batch dispatch.
//!
//! [`NotificationDispatcher`] sends one notification per recipient, in order,
//! through a [`NotificationSink`]. A failing recipient is recorded in the
//! [`DeliveryReport`] and the remaining recipients are still attempted.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::NotificationSink;
use super::user::User;

/// One message telling a recipient that a tweet was shared with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetNotification {
    pub recipient_email: String,
    pub recipient_name: String,
    pub content: String,
    pub author_name: String,
}

impl TweetNotification {
    /// Build the notification for `recipient`.
    pub fn for_recipient(recipient: &User, content: &str, author_name: &str) -> Self {
        Self {
            recipient_email: recipient.email().to_string(),
            recipient_name: recipient.name().to_string(),
            content: content.to_owned(),
            author_name: author_name.to_owned(),
        }
    }

    /// Subject line used by mail transports.
    pub fn subject(&self) -> String {
        format!("New Tweet from {}", self.author_name)
    }

    /// Plain-text body used by mail transports.
    pub fn body(&self) -> String {
        format!(
            "Hello {}, {} has shared a tweet with you: \"{}\"",
            self.recipient_name, self.author_name, self.content
        )
    }
}

/// Outcome for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed { reason: String },
}

/// Per-recipient outcomes of a batch, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    entries: Vec<(String, DeliveryStatus)>,
}

impl DeliveryReport {
    /// Recipient emails paired with their status.
    pub fn entries(&self) -> &[(String, DeliveryStatus)] {
        &self.entries
    }

    pub fn delivered(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, status)| *status == DeliveryStatus::Delivered)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.delivered()
    }
}

/// Fans a tweet out to its recipients through a [`NotificationSink`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Notify a single recipient.
    pub async fn notify(&self, recipient: &User, content: &str, author_name: &str) -> DeliveryStatus {
        let notification = TweetNotification::for_recipient(recipient, content, author_name);
        match self.sink.notify(&notification).await {
            Ok(()) => DeliveryStatus::Delivered,
            Err(err) => {
                warn!(
                    recipient = %notification.recipient_email,
                    error = %err,
                    "tweet notification failed"
                );
                DeliveryStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Notify every recipient sequentially. Never fails as a whole.
    pub async fn notify_batch(
        &self,
        recipients: &[User],
        content: &str,
        author_name: &str,
    ) -> DeliveryReport {
        if recipients.is_empty() {
            return DeliveryReport::default();
        }
        info!(
            count = recipients.len(),
            "Sending tweet notifications to {} recipient(s)",
            recipients.len()
        );

        let mut report = DeliveryReport::default();
        for recipient in recipients {
            let status = self.notify(recipient, content, author_name).await;
            report.entries.push((recipient.email().to_string(), status));
        }

        info!(
            delivered = report.delivered(),
            failed = report.failed(),
            "Successfully sent {} email notification(s)",
            report.delivered()
        );
        report
    }
}
