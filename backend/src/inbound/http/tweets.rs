//! Tweet handlers.
//!
//! ```text
//! POST /api/tweets {"content":"hello","sharedWithUserIds":["<uuid>"]}
//! GET /api/tweets/my-tweets
//! GET /api/tweets/shared-with-me
//! GET /api/tweets/{id}
//! ```
//!
//! Fixed segments are registered ahead of `/tweets/{id}` so they are not
//! captured as ids.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{NewTweet, TweetId, TweetView};

use super::ApiResult;
use super::identity::AuthenticatedUser;
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::{invalid_path_id, tweet_validation_error};

/// Request body for `POST /api/tweets`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTweetRequest {
    #[schema(example = "Hello from Tweetshare")]
    pub content: String,
    /// Users to share the tweet with; may be omitted.
    #[serde(default)]
    pub shared_with_user_ids: Option<Vec<String>>,
}

/// Post a tweet and share it with the listed users.
#[utoipa::path(
    post,
    path = "/api/tweets",
    request_body = CreateTweetRequest,
    responses(
        (status = 201, description = "Tweet created", body = TweetView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "createTweet"
)]
#[post("/tweets")]
pub async fn create_tweet(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTweetRequest>,
) -> ApiResult<HttpResponse> {
    let CreateTweetRequest {
        content,
        shared_with_user_ids,
    } = payload.into_inner();
    let request = NewTweet::try_from_parts(content, &shared_with_user_ids.unwrap_or_default())
        .map_err(tweet_validation_error)?;
    let created = state.tweets.create(user.id(), &request).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Tweets written by the caller, newest first, with their shares.
#[utoipa::path(
    get,
    path = "/api/tweets/my-tweets",
    responses(
        (status = 200, description = "Own tweets", body = [TweetView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "myTweets"
)]
#[get("/tweets/my-tweets")]
pub async fn my_tweets(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<TweetView>>> {
    let tweets = state.tweets_query.my_tweets(user.id()).await?;
    Ok(web::Json(tweets))
}

/// Tweets other users shared with the caller, newest share first.
#[utoipa::path(
    get,
    path = "/api/tweets/shared-with-me",
    responses(
        (status = 200, description = "Tweets shared with the caller", body = [TweetView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "sharedWithMe"
)]
#[get("/tweets/shared-with-me")]
pub async fn shared_with_me(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<TweetView>>> {
    let tweets = state.tweets_query.shared_with_me(user.id()).await?;
    Ok(web::Json(tweets))
}

/// A single tweet with its shares.
#[utoipa::path(
    get,
    path = "/api/tweets/{id}",
    params(("id" = String, Path, description = "Tweet identifier (UUID)")),
    responses(
        (status = 200, description = "Tweet", body = TweetView),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Tweet not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "getTweet"
)]
#[get("/tweets/{id}")]
pub async fn get_tweet(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TweetView>> {
    let raw = path.into_inner();
    let id: TweetId = raw.parse().map_err(|_| invalid_path_id(&raw))?;
    let tweet = state.tweets_query.find_one(&id).await?;
    Ok(web::Json(tweet))
}
