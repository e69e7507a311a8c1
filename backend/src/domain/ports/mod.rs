//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters.
//! Driven ports (repositories, hashing, tokens, notifications) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_command;
mod notification_sink;
mod password_hasher;
mod token_issuer;
mod tweet_repository;
mod tweets_command;
mod tweets_query;
mod user_repository;
mod users_query;

pub use auth_command::AuthCommand;
#[cfg(test)]
pub use auth_command::MockAuthCommand;
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NotificationError, NotificationSink};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use tweet_repository::MockTweetRepository;
pub use tweet_repository::{SharedTweet, TweetPersistenceError, TweetRepository};
#[cfg(test)]
pub use tweets_command::MockTweetsCommand;
pub use tweets_command::TweetsCommand;
#[cfg(test)]
pub use tweets_query::MockTweetsQuery;
pub use tweets_query::TweetsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
