//! `NotificationSink` that writes each message to the tracing log.
//!
//! Stands in for an SMTP transport: the rendered envelope is emitted as a
//! structured event on the `mail` target so it can be picked out of the log
//! stream.

use async_trait::async_trait;
use tracing::info;

use crate::domain::TweetNotification;
use crate::domain::ports::{NotificationError, NotificationSink};

/// Logs notifications instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl NotificationSink for LogMailer {
    async fn notify(&self, notification: &TweetNotification) -> Result<(), NotificationError> {
        if notification.recipient_email.is_empty() {
            return Err(NotificationError::delivery("recipient has no address"));
        }
        info!(
            target: "mail",
            from = %self.from,
            to = %notification.recipient_email,
            subject = %notification.subject(),
            body = %notification.body(),
            "email dispatched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn notification(email: &str) -> TweetNotification {
        TweetNotification {
            recipient_email: email.to_owned(),
            recipient_name: "Bob".to_owned(),
            content: "hello".to_owned(),
            author_name: "Ada".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn delivers_addressed_notifications() {
        let mailer = LogMailer::new("noreply@tweetshare.local");
        mailer
            .notify(&notification("bob@example.com"))
            .await
            .expect("delivered");
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_missing_address() {
        let err = LogMailer::default()
            .notify(&notification(""))
            .await
            .expect_err("no address");
        assert_eq!(
            err,
            NotificationError::delivery("recipient has no address")
        );
    }
}
