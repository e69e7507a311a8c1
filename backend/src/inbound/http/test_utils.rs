//! Test helpers for inbound HTTP components.

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::ports::{MockAuthCommand, MockTweetsCommand, MockTweetsQuery, MockUsersQuery};
use crate::domain::{DisplayName, Email, Error, User, UserId};

use super::state::HttpState;

/// Token accepted by [`MockPorts::signed_in`].
pub const TOKEN: &str = "valid-token";

/// Header pair carrying [`TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TOKEN}"))
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// A user with the given id and a name derived from `handle`.
pub fn user(id: &UserId, handle: &str) -> User {
    User::new(
        id.clone(),
        Email::new(format!("{handle}@example.com")).expect("valid email"),
        DisplayName::new(handle).expect("valid name"),
        fixed_time(),
    )
}

/// Driving-port mocks assembled into an [`HttpState`].
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthCommand,
    pub users: MockUsersQuery,
    pub tweets: MockTweetsCommand,
    pub tweets_query: MockTweetsQuery,
}

impl MockPorts {
    /// Ports whose `authenticate` accepts [`TOKEN`] as `id` and rejects
    /// anything else.
    pub fn signed_in(id: &UserId) -> Self {
        let mut ports = Self::default();
        let id = id.clone();
        ports.auth.expect_authenticate().returning(move |token| {
            if token == TOKEN {
                Ok(id.clone())
            } else {
                Err(Error::unauthorized("Unauthorized"))
            }
        });
        ports
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.auth),
            Arc::new(self.users),
            Arc::new(self.tweets),
            Arc::new(self.tweets_query),
        ))
    }
}
