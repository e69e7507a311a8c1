//! Tweets, shares and the views returned to clients.
//!
//! A [`Tweet`] is immutable once written. Each [`TweetShare`] grants one
//! recipient visibility of one tweet; the pair is unique.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{User, UserId};

/// Maximum tweet length, in characters.
pub const TWEET_CONTENT_MAX: usize = 280;

/// Validation errors for tweet payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TweetValidationError {
    #[error("tweet id must be a valid UUID")]
    InvalidId,
    #[error("content must not be empty")]
    EmptyContent,
    #[error("content must be at most {max} characters")]
    ContentTooLong { max: usize },
    #[error("shared user id {value:?} must be a valid UUID")]
    InvalidRecipient { value: String },
}

impl TweetValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyContent | Self::ContentTooLong { .. } => "content",
            Self::InvalidRecipient { .. } => "sharedWithUserIds",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyContent => "empty_content",
            Self::ContentTooLong { .. } => "content_too_long",
            Self::InvalidRecipient { .. } => "invalid_user_id",
        }
    }
}

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_newtype!(
    /// Stable tweet identifier.
    TweetId
);
uuid_newtype!(
    /// Stable share identifier.
    ShareId
);

impl std::str::FromStr for TweetId {
    type Err = TweetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TweetValidationError::InvalidId)
    }
}

/// Tweet body: non-empty after trimming and at most [`TWEET_CONTENT_MAX`]
/// characters. The caller's text is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TweetContent(String);

impl TweetContent {
    /// Validate tweet text.
    ///
    /// # Examples
    /// ```
    /// use tweetshare::domain::TweetContent;
    ///
    /// assert!(TweetContent::new("hello").is_ok());
    /// assert!(TweetContent::new("   ").is_err());
    /// ```
    pub fn new(content: impl Into<String>) -> Result<Self, TweetValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(TweetValidationError::EmptyContent);
        }
        if content.chars().count() > TWEET_CONTENT_MAX {
            return Err(TweetValidationError::ContentTooLong {
                max: TWEET_CONTENT_MAX,
            });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for TweetContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TweetContent> for String {
    fn from(value: TweetContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for TweetContent {
    type Error = TweetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted tweet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: TweetId,
    pub content: TweetContent,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Persisted share row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetShare {
    pub id: ShareId,
    pub tweet_id: TweetId,
    pub shared_with_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validated create-tweet request.
///
/// Recipients are de-duplicated in first-seen order. The author is removed
/// by the service once known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    content: TweetContent,
    recipients: Vec<UserId>,
}

impl NewTweet {
    /// Validate content and recipient identifiers.
    pub fn try_from_parts(
        content: String,
        recipient_ids: &[String],
    ) -> Result<Self, TweetValidationError> {
        let content = TweetContent::new(content)?;
        let mut recipients: Vec<UserId> = Vec::with_capacity(recipient_ids.len());
        for raw in recipient_ids {
            let id = UserId::new(raw).map_err(|_| TweetValidationError::InvalidRecipient {
                value: raw.clone(),
            })?;
            if !recipients.contains(&id) {
                recipients.push(id);
            }
        }
        Ok(Self {
            content,
            recipients,
        })
    }

    pub fn content(&self) -> &TweetContent {
        &self.content
    }

    pub fn recipients(&self) -> &[UserId] {
        &self.recipients
    }
}

/// A share as returned to clients, with the recipient resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TweetShareView {
    #[schema(value_type = String, format = Uuid)]
    pub id: ShareId,
    #[schema(value_type = String, format = Uuid)]
    pub tweet_id: TweetId,
    #[schema(value_type = String, format = Uuid)]
    pub shared_with_id: UserId,
    pub created_at: DateTime<Utc>,
    pub shared_with_user: User,
}

/// A tweet as returned to clients, with its author and optionally its
/// shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    #[schema(value_type = String, format = Uuid)]
    pub id: TweetId,
    #[schema(value_type = String, example = "Hello from Tweetshare")]
    pub content: TweetContent,
    #[schema(value_type = String, format = Uuid)]
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub author: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_with: Option<Vec<TweetShareView>>,
}

impl TweetView {
    /// View without share information.
    pub fn new(tweet: Tweet, author: User) -> Self {
        Self {
            id: tweet.id,
            content: tweet.content,
            author_id: tweet.author_id,
            created_at: tweet.created_at,
            author,
            shared_with: None,
        }
    }

    /// Attach resolved shares.
    pub fn with_shares(mut self, shares: Vec<TweetShareView>) -> Self {
        self.shared_with = Some(shares);
        self
    }
}
