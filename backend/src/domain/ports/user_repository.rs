//! User query and command facets.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::RepositoryError;

/// Selects which users [`UserQuery::list`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListFilter {
    user_ids: Option<Vec<UserId>>,
}

impl UserListFilter {
    /// Match every stored user.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match users whose id is in `ids`. An empty set matches nothing.
    pub fn by_user_ids(ids: impl Into<Vec<UserId>>) -> Self {
        Self {
            user_ids: Some(ids.into()),
        }
    }

    /// Id restriction, if any.
    pub fn user_ids(&self) -> Option<&[UserId]> {
        self.user_ids.as_deref()
    }
}

/// Read-only access to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a user by id; `None` when absent.
    async fn find(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// List users in creation order.
    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, RepositoryError>;
}

/// User writes, reachable only through a [`super::Transaction`].
#[async_trait]
pub trait UserCommand: Send {
    async fn create(&mut self, user: &User) -> Result<(), RepositoryError>;

    /// Replace name and email of an existing user.
    async fn update(&mut self, user: &User) -> Result<(), RepositoryError>;

    async fn delete(&mut self, id: &UserId) -> Result<(), RepositoryError>;
}
