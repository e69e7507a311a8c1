//! Driving port for reading tweets.

use async_trait::async_trait;

use crate::domain::{Error, TweetId, TweetView, UserId};

/// Domain use-case port for tweet timelines and lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetsQuery: Send + Sync {
    /// Tweets written by `user`, newest first, with their shares.
    async fn my_tweets(&self, user: &UserId) -> Result<Vec<TweetView>, Error>;

    /// Tweets shared with `user`, newest share first.
    async fn shared_with_me(&self, user: &UserId) -> Result<Vec<TweetView>, Error>;

    /// A single tweet with its shares.
    async fn find_one(&self, id: &TweetId) -> Result<TweetView, Error>;
}
