//! Account domain service implementing the [`AuthCommand`] driving port.
//!
//! Registration, login and password changes are orchestrated here against
//! the user repository, the password hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AuthCommand, PasswordHashError, PasswordHasher, TokenError, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AuthSession, Error, LoginCredentials, PasswordChange, PasswordChanged, Registration, User,
    UserAccount, UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authentication service implementing [`AuthCommand`].
#[derive(Clone)]
pub struct AuthService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, H, T> AuthService<R, H, T> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => duplicate_email(),
    }
}

fn duplicate_email() -> Error {
    Error::conflict("User with this email already exists").with_details(json!({
        "field": "email",
        "code": "duplicate_email",
    }))
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
        TokenError::Invalid { .. } | TokenError::Expired => Error::unauthorized("Unauthorized"),
    }
}

impl<R, H, T> AuthService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn session_for(&self, user: User) -> Result<AuthSession, Error> {
        let access_token = self.tokens.issue(&user).map_err(map_token_error)?;
        Ok(AuthSession { user, access_token })
    }
}

#[async_trait]
impl<R, H, T> AuthCommand for AuthService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.name().clone(),
            self.clock.utc(),
        );
        let account = UserAccount::new(user, password_hash);
        self.users.insert(&account).await.map_err(map_user_error)?;

        let user = account.into_user();
        info!(user_id = %user.id(), "user registered");
        self.session_for(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.session_for(account.into_user())
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: &PasswordChange,
    ) -> Result<PasswordChanged, Error> {
        let Some(account) = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized("User not found"));
        };

        let matches = self
            .hasher
            .verify(change.old_password(), account.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(
                Error::invalid_request("Current password is incorrect").with_details(json!({
                    "field": "oldPassword",
                    "code": "incorrect_password",
                })),
            );
        }

        let new_hash = self
            .hasher
            .hash(change.new_password())
            .await
            .map_err(map_hash_error)?;
        let updated = self
            .users
            .update_password_hash(user_id, &new_hash)
            .await
            .map_err(map_user_error)?;
        if !updated {
            return Err(Error::unauthorized("User not found"));
        }

        info!(user_id = %user_id, "password changed");
        Ok(PasswordChanged::default())
    }

    async fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        let user_id = self.tokens.verify(token).map_err(map_token_error)?;
        let exists = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .is_some();
        if exists {
            Ok(user_id)
        } else {
            Err(Error::unauthorized("Unauthorized"))
        }
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
