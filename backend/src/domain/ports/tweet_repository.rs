//! Port for tweet and share persistence.

use async_trait::async_trait;

use crate::domain::{Tweet, TweetId, TweetShare, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tweet repository adapters.
    pub enum TweetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "tweet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tweet repository query failed: {message}",
    }
}

/// A share naming the recipient, joined with the tweet it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedTweet {
    pub share: TweetShare,
    pub tweet: Tweet,
}

/// Storage contract for tweets and their shares.
///
/// Ordering guarantees are part of the contract: list operations return the
/// newest entries first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Persist a tweet row.
    async fn insert_tweet(&self, tweet: &Tweet) -> Result<(), TweetPersistenceError>;

    /// Persist a batch of shares atomically: either every share is written
    /// or none is.
    async fn insert_shares(&self, shares: &[TweetShare]) -> Result<(), TweetPersistenceError>;

    /// Fetch a tweet by identifier.
    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, TweetPersistenceError>;

    /// Tweets written by `author`, newest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Tweet>, TweetPersistenceError>;

    /// Shares naming `recipient` with their tweets, newest share first.
    async fn list_shared_with(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<SharedTweet>, TweetPersistenceError>;

    /// Every share of any tweet in `tweet_ids`, oldest first.
    async fn shares_for_tweets(
        &self,
        tweet_ids: &[TweetId],
    ) -> Result<Vec<TweetShare>, TweetPersistenceError>;
}
