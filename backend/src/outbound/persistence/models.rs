//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types validate stored values and surface corrupt rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    DisplayName, Email, PasswordHash, ShareId, Tweet, TweetContent, TweetId, TweetShare, User,
    UserAccount, UserId,
};

use super::schema::{tweet_shares, tweets, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_account(self) -> Result<UserAccount, String> {
        let email = Email::new(&self.email).map_err(|err| format!("user {}: {err}", self.id))?;
        let name = DisplayName::new(&self.name).map_err(|err| format!("user {}: {err}", self.id))?;
        let user = User::new(UserId::from_uuid(self.id), email, name, self.created_at);
        Ok(UserAccount::new(user, PasswordHash::new(self.password_hash)))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = account.user();
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name().as_ref(),
            password_hash: account.password_hash().as_str(),
            created_at: user.created_at(),
            updated_at: user.created_at(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TweetRow {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TweetRow {
    pub fn into_domain(self) -> Result<Tweet, String> {
        let content =
            TweetContent::new(self.content).map_err(|err| format!("tweet {}: {err}", self.id))?;
        Ok(Tweet {
            id: TweetId::from_uuid(self.id),
            content,
            author_id: UserId::from_uuid(self.author_id),
            created_at: self.created_at,
        })
    }
}

impl From<&Tweet> for TweetRow {
    fn from(tweet: &Tweet) -> Self {
        Self {
            id: *tweet.id.as_uuid(),
            content: tweet.content.as_ref().to_owned(),
            author_id: *tweet.author_id.as_uuid(),
            created_at: tweet.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tweet_shares)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShareRow {
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub shared_with_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ShareRow> for TweetShare {
    fn from(row: ShareRow) -> Self {
        Self {
            id: ShareId::from_uuid(row.id),
            tweet_id: TweetId::from_uuid(row.tweet_id),
            shared_with_id: UserId::from_uuid(row.shared_with_id),
            created_at: row.created_at,
        }
    }
}

impl From<&TweetShare> for ShareRow {
    fn from(share: &TweetShare) -> Self {
        Self {
            id: *share.id.as_uuid(),
            tweet_id: *share.tweet_id.as_uuid(),
            shared_with_id: *share.shared_with_id.as_uuid(),
            created_at: share.created_at,
        }
    }
}
