use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Accounts are append-only here: no update or delete operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`UserError::DuplicateEmail`] when an
    /// account with the same email already exists.
    async fn insert(&self, user: &User) -> UserResult<()>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation keyed by email, for tests and local runs.
/// Enforces email uniqueness atomically under the write lock, matching the
/// unique-index behavior of the MongoDB implementation.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserError::DuplicateEmail(user.email.clone()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }
}
