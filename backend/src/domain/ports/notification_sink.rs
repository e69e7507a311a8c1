//! Port for delivering tweet notifications to recipients.

use async_trait::async_trait;

use crate::domain::TweetNotification;

use super::define_port_error;

define_port_error! {
    /// Delivery failures for a single notification.
    pub enum NotificationError {
        /// The transport refused or failed to deliver the message.
        Delivery { message: String } => "notification delivery failed: {message}",
    }
}

/// Best-effort delivery of one notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &TweetNotification) -> Result<(), NotificationError>;
}
