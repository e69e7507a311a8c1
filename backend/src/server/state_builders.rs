//! Builders wiring repositories, credential adapters and services into the
//! HTTP state.

use std::sync::Arc;

use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{TweetRepository, UserRepository};
use crate::domain::{AuthService, NotificationDispatcher, TweetService, UserDirectoryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryTweetRepository, InMemoryUserRepository};
use crate::outbound::notifications::LogMailer;
use crate::outbound::persistence::{DbPool, DieselTweetRepository, DieselUserRepository};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenIssuer, token_ttl};

/// Where users and tweets are stored.
pub enum Stores {
    InMemory,
    Postgres(DbPool),
}

/// Credential and notification settings shared by the services.
pub struct ServiceSettings {
    pub jwt_secret: Zeroizing<Vec<u8>>,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub mail_from: String,
}

fn assemble<U, T>(
    users: Arc<U>,
    tweets: Arc<T>,
    settings: &ServiceSettings,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    T: TweetRepository + 'static,
{
    let hasher = Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost));
    let tokens = Arc::new(JwtTokenIssuer::new(
        &settings.jwt_secret,
        token_ttl(settings.token_ttl_days),
        clock.clone(),
    ));
    let dispatcher =
        NotificationDispatcher::new(Arc::new(LogMailer::new(settings.mail_from.clone())));

    let auth = Arc::new(AuthService::new(users.clone(), hasher, tokens, clock.clone()));
    let directory = Arc::new(UserDirectoryService::new(users.clone()));
    let tweet_service = Arc::new(TweetService::new(users, tweets, dispatcher, clock));

    HttpState::new(auth, directory, tweet_service.clone(), tweet_service)
}

/// Build the HTTP state over the chosen stores.
pub fn build_http_state(
    stores: Stores,
    settings: &ServiceSettings,
    clock: Arc<dyn Clock>,
) -> HttpState {
    match stores {
        Stores::InMemory => assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTweetRepository::new()),
            settings,
            clock,
        ),
        Stores::Postgres(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTweetRepository::new(pool)),
            settings,
            clock,
        ),
    }
}
