//! In-memory `UserRepository`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserAccount, UserId};

/// Accounts kept in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Vec<UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let email = account.user().email();
        if accounts.iter().any(|existing| existing.user().email() == email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        if accounts
            .iter()
            .any(|existing| existing.user().id() == account.user().id())
        {
            return Err(UserPersistenceError::query("unique constraint violated"));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|account| account.user().id() == id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|account| account.user().email() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().map(|account| account.user().clone()).collect())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .filter(|account| ids.contains(account.user().id()))
            .map(|account| account.user().clone())
            .collect())
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.accounts.write().await;
        let Some(slot) = accounts.iter_mut().find(|account| account.user().id() == id) else {
            return Ok(false);
        };
        *slot = UserAccount::new(slot.user().clone(), password_hash.clone());
        Ok(true)
    }
}
