//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities used by the API and
//! persistence layers, plus the services that implement the driving ports.
//! Types are immutable once built and document their invariants and serde
//! contracts in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserAccount and friends: identities and credentials.
//! - Tweet, TweetShare, TweetView: tweets and how they are presented.
//! - AuthService, UserDirectoryService, TweetService: use-case services.

pub mod auth;
mod auth_service;
pub mod error;
pub mod notification;
pub mod ports;
mod trace_id;
pub mod tweet;
mod tweet_service;
pub mod user;
mod user_directory_service;

pub use self::auth::{
    AccessToken, AuthSession, AuthValidationError, LoginCredentials, PASSWORD_MIN, PasswordChange,
    PasswordChanged, Registration,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{
    DeliveryReport, DeliveryStatus, NotificationDispatcher, TweetNotification,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tweet::{
    NewTweet, ShareId, TWEET_CONTENT_MAX, Tweet, TweetContent, TweetId, TweetShare,
    TweetShareView, TweetValidationError, TweetView,
};
pub use self::tweet_service::TweetService;
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EMAIL_MAX, Email, PasswordHash, User, UserAccount, UserId,
    UserValidationError,
};
pub use self::user_directory_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use tweetshare::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
