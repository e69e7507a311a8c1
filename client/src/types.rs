//! Wire types mirroring the API's JSON bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A share of a tweet with one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetShare {
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub shared_with_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub shared_with_user: User,
}

/// A tweet with its author and, where the endpoint attaches them, its shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_with: Option<Vec<TweetShare>>,
}

impl Tweet {
    /// Shares attached to the tweet, empty when none were returned.
    pub fn shares(&self) -> &[TweetShare] {
        self.shared_with.as_deref().unwrap_or_default()
    }
}

/// Body of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordData {
    pub old_password: String,
    pub new_password: String,
}

/// Tweet creation form. Recipients are omitted from the body when empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTweetData {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared_with_user_ids: Vec<Uuid>,
}

/// Error envelope returned by the API for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}
