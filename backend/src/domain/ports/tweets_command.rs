//! Driving port for writing tweets.

use async_trait::async_trait;

use crate::domain::{Error, NewTweet, TweetView, UserId};

/// Domain use-case port for posting tweets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetsCommand: Send + Sync {
    /// Post a tweet as `author`, share it with the requested recipients and
    /// notify them.
    async fn create(&self, author: &UserId, request: &NewTweet) -> Result<TweetView, Error>;
}
