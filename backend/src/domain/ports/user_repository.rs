//! Port abstraction for user persistence adapters and their errors.
//!
//! Accounts are stored together with their password hash. Adapters must
//! enforce email uniqueness and report collisions as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;

use crate::domain::{Email, PasswordHash, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Every registered user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Users matching any of `ids`. Unknown identifiers are skipped; order is
    /// unspecified.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the stored hash. Returns `false` when no such user exists.
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError>;
}
