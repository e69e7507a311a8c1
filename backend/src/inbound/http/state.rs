//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthCommand, TweetsCommand, TweetsQuery, UsersQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```ignore
/// use std::sync::Arc;
/// use tweetshare::inbound::http::state::HttpState;
///
/// let service = Arc::new(tweet_service);
/// let state = HttpState::new(auth, users, service.clone(), service);
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub tweets: Arc<dyn TweetsCommand>,
    pub tweets_query: Arc<dyn TweetsQuery>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthCommand>,
        users: Arc<dyn UsersQuery>,
        tweets: Arc<dyn TweetsCommand>,
        tweets_query: Arc<dyn TweetsQuery>,
    ) -> Self {
        Self {
            auth,
            users,
            tweets,
            tweets_query,
        }
    }
}
