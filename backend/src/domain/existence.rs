//! Existence checks used to guard cross-aggregate references.
//!
//! These services only read through the query facets. They never open a
//! transaction, so a check and the write it guards are not serialised
//! against concurrent requests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{GroupListFilter, Repository, RepositoryError, UserListFilter};
use super::{GroupId, UserId};

/// Presence checks for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserExistence: Send + Sync {
    /// `true` when a user with `id` is stored.
    async fn exists(&self, id: &UserId) -> Result<bool, RepositoryError>;

    /// `true` when the number of distinct stored users among `ids` equals
    /// `ids.len()`.
    ///
    /// Repeated ids therefore yield `false`. An empty slice yields `true`;
    /// callers skip the check for empty member lists instead of relying on it.
    async fn exists_all(&self, ids: &[UserId]) -> Result<bool, RepositoryError>;
}

/// Presence checks for groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupExistence: Send + Sync {
    async fn exists(&self, id: &GroupId) -> Result<bool, RepositoryError>;

    /// `true` when at least one group references at least one of `ids`.
    async fn has_users_any(&self, ids: &[UserId]) -> Result<bool, RepositoryError>;
}

/// [`UserExistence`] backed by the repository's user query facet.
#[derive(Clone)]
pub struct UserExistenceService<R> {
    repository: Arc<R>,
}

impl<R> UserExistenceService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UserExistence for UserExistenceService<R>
where
    R: Repository,
{
    async fn exists(&self, id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.repository.users().find(id).await?.is_some())
    }

    async fn exists_all(&self, ids: &[UserId]) -> Result<bool, RepositoryError> {
        if ids.is_empty() {
            return Ok(true);
        }
        let found = self
            .repository
            .users()
            .list(&UserListFilter::by_user_ids(ids))
            .await?;
        let distinct: HashSet<&UserId> = found.iter().map(|user| user.id()).collect();
        Ok(distinct.len() == ids.len())
    }
}

/// [`GroupExistence`] backed by the repository's group query facet.
#[derive(Clone)]
pub struct GroupExistenceService<R> {
    repository: Arc<R>,
}

impl<R> GroupExistenceService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> GroupExistence for GroupExistenceService<R>
where
    R: Repository,
{
    async fn exists(&self, id: &GroupId) -> Result<bool, RepositoryError> {
        Ok(self.repository.groups().find(id).await?.is_some())
    }

    async fn has_users_any(&self, ids: &[UserId]) -> Result<bool, RepositoryError> {
        if ids.is_empty() {
            return Ok(false);
        }
        let groups = self
            .repository
            .groups()
            .list(&GroupListFilter::by_user_ids(ids))
            .await?;
        Ok(!groups.is_empty())
    }
}

#[cfg(test)]
#[path = "existence_tests.rs"]
mod tests;
