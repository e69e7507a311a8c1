//! In-memory `TweetRepository`.

use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SharedTweet, TweetPersistenceError, TweetRepository};
use crate::domain::{Tweet, TweetId, TweetShare, UserId};

#[derive(Debug, Default)]
struct Store {
    tweets: Vec<Tweet>,
    shares: Vec<TweetShare>,
}

/// Tweets and shares kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTweetRepository {
    store: RwLock<Store>,
}

impl InMemoryTweetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; among equal timestamps the later insert wins.
fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.reverse();
    items.sort_by_key(|item| Reverse(key(item)));
    items
}

#[async_trait]
impl TweetRepository for InMemoryTweetRepository {
    async fn insert_tweet(&self, tweet: &Tweet) -> Result<(), TweetPersistenceError> {
        let mut store = self.store.write().await;
        if store.tweets.iter().any(|existing| existing.id == tweet.id) {
            return Err(TweetPersistenceError::query("unique constraint violated"));
        }
        store.tweets.push(tweet.clone());
        Ok(())
    }

    async fn insert_shares(&self, shares: &[TweetShare]) -> Result<(), TweetPersistenceError> {
        let mut store = self.store.write().await;
        for (index, share) in shares.iter().enumerate() {
            if !store.tweets.iter().any(|tweet| tweet.id == share.tweet_id) {
                return Err(TweetPersistenceError::query(
                    "referenced record does not exist",
                ));
            }
            let same_pair = |other: &TweetShare| {
                other.tweet_id == share.tweet_id && other.shared_with_id == share.shared_with_id
            };
            let earlier = &shares[..index];
            if store.shares.iter().any(same_pair) || earlier.iter().any(same_pair) {
                return Err(TweetPersistenceError::query("unique constraint violated"));
            }
        }
        store.shares.extend_from_slice(shares);
        Ok(())
    }

    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, TweetPersistenceError> {
        let store = self.store.read().await;
        Ok(store.tweets.iter().find(|tweet| tweet.id == *id).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Tweet>, TweetPersistenceError> {
        let store = self.store.read().await;
        let mine: Vec<Tweet> = store
            .tweets
            .iter()
            .filter(|tweet| tweet.author_id == *author)
            .cloned()
            .collect();
        Ok(newest_first(mine, |tweet| tweet.created_at))
    }

    async fn list_shared_with(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<SharedTweet>, TweetPersistenceError> {
        let store = self.store.read().await;
        let joined: Vec<SharedTweet> = store
            .shares
            .iter()
            .filter(|share| share.shared_with_id == *recipient)
            .filter_map(|share| {
                let tweet = store.tweets.iter().find(|tweet| tweet.id == share.tweet_id)?;
                Some(SharedTweet {
                    share: share.clone(),
                    tweet: tweet.clone(),
                })
            })
            .collect();
        Ok(newest_first(joined, |entry| entry.share.created_at))
    }

    async fn shares_for_tweets(
        &self,
        tweet_ids: &[TweetId],
    ) -> Result<Vec<TweetShare>, TweetPersistenceError> {
        let store = self.store.read().await;
        Ok(store
            .shares
            .iter()
            .filter(|share| tweet_ids.contains(&share.tweet_id))
            .cloned()
            .collect())
    }
}
