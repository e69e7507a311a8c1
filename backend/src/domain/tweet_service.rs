//! Tweet domain service implementing the [`TweetsCommand`] and
//! [`TweetsQuery`] driving ports.
//!
//! Creation writes the tweet, then its shares, then notifies recipients.
//! Notification failures are logged and never fail the request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::auth_service::map_user_error;
use crate::domain::ports::{
    TweetPersistenceError, TweetRepository, TweetsCommand, TweetsQuery, UserRepository,
};
use crate::domain::{
    Error, NewTweet, NotificationDispatcher, ShareId, Tweet, TweetId, TweetShare, TweetShareView,
    TweetView, User, UserAccount, UserId,
};

/// Tweet service implementing both tweet driving ports.
#[derive(Clone)]
pub struct TweetService<U, T> {
    users: Arc<U>,
    tweets: Arc<T>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
}

impl<U, T> TweetService<U, T> {
    /// Create a new service with the given repositories and dispatcher.
    pub fn new(
        users: Arc<U>,
        tweets: Arc<T>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            tweets,
            dispatcher,
            clock,
        }
    }
}

fn map_tweet_error(error: TweetPersistenceError) -> Error {
    match error {
        TweetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("tweet repository unavailable: {message}"))
        }
        TweetPersistenceError::Query { message } => {
            Error::internal(format!("tweet repository error: {message}"))
        }
    }
}

fn share_views(shares: Vec<TweetShare>, users: &HashMap<UserId, User>) -> Vec<TweetShareView> {
    shares
        .into_iter()
        .filter_map(|share| {
            let recipient = users.get(&share.shared_with_id)?.clone();
            Some(TweetShareView {
                id: share.id,
                tweet_id: share.tweet_id,
                shared_with_id: share.shared_with_id,
                created_at: share.created_at,
                shared_with_user: recipient,
            })
        })
        .collect()
}

impl<U, T> TweetService<U, T>
where
    U: UserRepository,
    T: TweetRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(UserAccount::into_user)
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn users_by_id(&self, ids: &[UserId]) -> Result<HashMap<UserId, User>, Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.users.find_by_ids(ids).await.map_err(map_user_error)?;
        Ok(users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect())
    }

    /// Resolve recipients in request order, rejecting unknown identifiers.
    async fn resolve_recipients(&self, ids: &[UserId]) -> Result<Vec<User>, Error> {
        let mut found = self.users_by_id(ids).await?;
        let missing: Vec<&str> = ids
            .iter()
            .filter(|id| !found.contains_key(*id))
            .map(AsRef::as_ref)
            .collect();
        if !missing.is_empty() {
            return Err(Error::invalid_request("Unknown recipient").with_details(json!({
                "field": "sharedWithUserIds",
                "code": "unknown_user",
                "ids": missing,
            })));
        }
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }

    async fn shares_by_tweet(
        &self,
        tweet_ids: &[TweetId],
    ) -> Result<HashMap<TweetId, Vec<TweetShareView>>, Error> {
        if tweet_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let shares = self
            .tweets
            .shares_for_tweets(tweet_ids)
            .await
            .map_err(map_tweet_error)?;
        let mut recipient_ids: Vec<UserId> = Vec::new();
        for share in &shares {
            if !recipient_ids.contains(&share.shared_with_id) {
                recipient_ids.push(share.shared_with_id.clone());
            }
        }
        let recipients = self.users_by_id(&recipient_ids).await?;

        let mut grouped: HashMap<TweetId, Vec<TweetShareView>> = HashMap::new();
        for view in share_views(shares, &recipients) {
            grouped.entry(view.tweet_id).or_default().push(view);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl<U, T> TweetsCommand for TweetService<U, T>
where
    U: UserRepository,
    T: TweetRepository,
{
    async fn create(&self, author_id: &UserId, request: &NewTweet) -> Result<TweetView, Error> {
        let author = self.require_user(author_id).await?;
        let recipient_ids: Vec<UserId> = request
            .recipients()
            .iter()
            .filter(|id| *id != author_id)
            .cloned()
            .collect();
        let recipients = self.resolve_recipients(&recipient_ids).await?;

        let now = self.clock.utc();
        let tweet = Tweet {
            id: TweetId::random(),
            content: request.content().clone(),
            author_id: author_id.clone(),
            created_at: now,
        };
        self.tweets
            .insert_tweet(&tweet)
            .await
            .map_err(map_tweet_error)?;

        if !recipients.is_empty() {
            let shares: Vec<TweetShare> = recipients
                .iter()
                .map(|recipient| TweetShare {
                    id: ShareId::random(),
                    tweet_id: tweet.id,
                    shared_with_id: recipient.id().clone(),
                    created_at: now,
                })
                .collect();
            self.tweets
                .insert_shares(&shares)
                .await
                .map_err(map_tweet_error)?;

            let report = self
                .dispatcher
                .notify_batch(&recipients, tweet.content.as_ref(), author.name().as_ref())
                .await;
            info!(
                tweet_id = %tweet.id,
                delivered = report.delivered(),
                failed = report.failed(),
                "tweet shared"
            );
        }

        Ok(TweetView::new(tweet, author))
    }
}

#[async_trait]
impl<U, T> TweetsQuery for TweetService<U, T>
where
    U: UserRepository,
    T: TweetRepository,
{
    async fn my_tweets(&self, user: &UserId) -> Result<Vec<TweetView>, Error> {
        let author = self.require_user(user).await?;
        let tweets = self
            .tweets
            .list_by_author(user)
            .await
            .map_err(map_tweet_error)?;
        let ids: Vec<TweetId> = tweets.iter().map(|tweet| tweet.id).collect();
        let mut shares = self.shares_by_tweet(&ids).await?;

        Ok(tweets
            .into_iter()
            .map(|tweet| {
                let tweet_shares = shares.remove(&tweet.id).unwrap_or_default();
                TweetView::new(tweet, author.clone()).with_shares(tweet_shares)
            })
            .collect())
    }

    async fn shared_with_me(&self, user: &UserId) -> Result<Vec<TweetView>, Error> {
        let shared = self
            .tweets
            .list_shared_with(user)
            .await
            .map_err(map_tweet_error)?;
        let mut author_ids: Vec<UserId> = Vec::new();
        for entry in &shared {
            if !author_ids.contains(&entry.tweet.author_id) {
                author_ids.push(entry.tweet.author_id.clone());
            }
        }
        let authors = self.users_by_id(&author_ids).await?;

        shared
            .into_iter()
            .map(|entry| {
                let author = authors.get(&entry.tweet.author_id).cloned().ok_or_else(|| {
                    Error::internal(format!("author of tweet {} is missing", entry.tweet.id))
                })?;
                Ok(TweetView::new(entry.tweet, author))
            })
            .collect()
    }

    async fn find_one(&self, id: &TweetId) -> Result<TweetView, Error> {
        let tweet = self
            .tweets
            .find_by_id(id)
            .await
            .map_err(map_tweet_error)?
            .ok_or_else(|| Error::not_found("Tweet not found"))?;
        let author = self.require_user(&tweet.author_id).await?;
        let shares = self
            .shares_by_tweet(&[tweet.id])
            .await?
            .remove(&tweet.id)
            .unwrap_or_default();
        Ok(TweetView::new(tweet, author).with_shares(shares))
    }
}

#[cfg(test)]
#[path = "tweet_service_tests.rs"]
mod tests;
