//! Driving port for account and credential use-cases.
//!
//! Inbound adapters call this port to register, log in, rotate passwords and
//! resolve bearer tokens without importing persistence or crypto adapters.

use async_trait::async_trait;

use crate::domain::{
    AuthSession, Error, LoginCredentials, PasswordChange, PasswordChanged, Registration, UserId,
};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account and sign the new user in.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;

    /// Check credentials and issue a fresh token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    /// Replace the password of `user_id` after checking the current one.
    async fn change_password(
        &self,
        user_id: &UserId,
        change: &PasswordChange,
    ) -> Result<PasswordChanged, Error>;

    /// Resolve a bearer token to the user it identifies.
    async fn authenticate(&self, token: &str) -> Result<UserId, Error>;
}
