//! User directory service implementing the [`UsersQuery`] driving port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth_service::map_user_error;
use crate::domain::ports::{UserRepository, UsersQuery};
use crate::domain::{Error, User, UserAccount, UserId};

/// Read-only access to registered users.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    users: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_user_error)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(UserAccount::into_user)
            .ok_or_else(|| Error::not_found("User not found"))
    }
}
