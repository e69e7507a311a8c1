//! PostgreSQL-backed `TweetRepository` implementation using Diesel ORM.
//!
//! Share batches are written inside a single transaction so a failure leaves
//! no partial set of shares behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SharedTweet, TweetPersistenceError, TweetRepository};
use crate::domain::{Tweet, TweetId, TweetShare, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ShareRow, TweetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{tweet_shares, tweets};

/// Diesel-backed implementation of the [`TweetRepository`] port.
#[derive(Clone)]
pub struct DieselTweetRepository {
    pool: DbPool,
}

impl DieselTweetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TweetPersistenceError {
    map_pool_error(error, TweetPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TweetPersistenceError {
    map_diesel_error(
        error,
        TweetPersistenceError::query,
        TweetPersistenceError::connection,
    )
}

fn row_to_tweet(row: TweetRow) -> Result<Tweet, TweetPersistenceError> {
    row.into_domain().map_err(TweetPersistenceError::query)
}

#[async_trait]
impl TweetRepository for DieselTweetRepository {
    async fn insert_tweet(&self, tweet: &Tweet) -> Result<(), TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(tweets::table)
            .values(TweetRow::from(tweet))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn insert_shares(&self, shares: &[TweetShare]) -> Result<(), TweetPersistenceError> {
        if shares.is_empty() {
            return Ok(());
        }
        let rows: Vec<ShareRow> = shares.iter().map(ShareRow::from).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(tweet_shares::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &TweetId) -> Result<Option<Tweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        tweets::table
            .find(*id.as_uuid())
            .select(TweetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_tweet)
            .transpose()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Tweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<TweetRow> = tweets::table
            .filter(tweets::author_id.eq(*author.as_uuid()))
            .order((tweets::created_at.desc(), tweets::id.desc()))
            .select(TweetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_tweet).collect()
    }

    async fn list_shared_with(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<SharedTweet>, TweetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<(ShareRow, TweetRow)> = tweet_shares::table
            .inner_join(tweets::table)
            .filter(tweet_shares::shared_with_id.eq(*recipient.as_uuid()))
            .order((tweet_shares::created_at.desc(), tweet_shares::id.desc()))
            .select((ShareRow::as_select(), TweetRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(|(share, tweet)| {
                Ok(SharedTweet {
                    share: share.into(),
                    tweet: row_to_tweet(tweet)?,
                })
            })
            .collect()
    }

    async fn shares_for_tweets(
        &self,
        tweet_ids: &[TweetId],
    ) -> Result<Vec<TweetShare>, TweetPersistenceError> {
        if tweet_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = tweet_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ShareRow> = tweet_shares::table
            .filter(tweet_shares::tweet_id.eq_any(ids))
            .order((tweet_shares::created_at.asc(), tweet_shares::id.asc()))
            .select(ShareRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(TweetShare::from).collect())
    }
}
