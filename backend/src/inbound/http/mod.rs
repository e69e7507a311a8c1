//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod identity;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tweets;
pub mod users;
pub mod validation;

pub use error::ApiResult;
pub use identity::AuthenticatedUser;
pub use validation::json_config;

use actix_web::web;

/// Register every `/api` route on `cfg`.
///
/// Fixed paths precede parameterised ones so `/users/me` and
/// `/tweets/my-tweets` resolve to their own handlers.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::change_password)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::get_user)
        .service(tweets::create_tweet)
        .service(tweets::my_tweets)
        .service(tweets::shared_with_me)
        .service(tweets::get_tweet);
}
