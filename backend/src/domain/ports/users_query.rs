//! Driving port for the user directory.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or `not_found`.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
