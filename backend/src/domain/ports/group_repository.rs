//! Group query and command facets.
//!
//! Membership is stored as (group id, user id) association rows owned by the
//! group side. Users carry no back-reference, so removing a user from every
//! group is an explicit command ([`GroupCommand::remove_users_from_all`]).

use async_trait::async_trait;

use crate::domain::{Group, GroupId, UserId};

use super::RepositoryError;

/// Selects which groups [`GroupQuery::list`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupListFilter {
    user_ids: Option<Vec<UserId>>,
}

impl GroupListFilter {
    /// Match every stored group.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match groups referencing at least one of `ids`. An empty set matches
    /// nothing.
    pub fn by_user_ids(ids: impl Into<Vec<UserId>>) -> Self {
        Self {
            user_ids: Some(ids.into()),
        }
    }

    pub fn user_ids(&self) -> Option<&[UserId]> {
        self.user_ids.as_deref()
    }
}

/// Read-only access to stored groups.
///
/// Returned groups always carry their complete member list in association
/// insertion order, even when a filter matched only some of the members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupQuery: Send + Sync {
    async fn find(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError>;

    /// List groups in creation order.
    async fn list(&self, filter: &GroupListFilter) -> Result<Vec<Group>, RepositoryError>;
}

/// Group writes, reachable only through a [`super::Transaction`].
#[async_trait]
pub trait GroupCommand: Send {
    /// Persist the group row. Member ids are ignored; see
    /// [`GroupCommand::add_users`].
    async fn create(&mut self, group: &Group) -> Result<(), RepositoryError>;

    /// Rename an existing group. Associations are left untouched.
    async fn update(&mut self, group: &Group) -> Result<(), RepositoryError>;

    /// Delete the group row.
    async fn delete(&mut self, id: &GroupId) -> Result<(), RepositoryError>;

    /// Append association rows; pairs that already exist are skipped.
    async fn add_users(&mut self, id: &GroupId, user_ids: &[UserId]) -> Result<(), RepositoryError>;

    /// Remove the given users from one group.
    async fn remove_users(
        &mut self,
        id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError>;

    /// Remove the given users from every group.
    async fn remove_users_from_all(&mut self, user_ids: &[UserId]) -> Result<(), RepositoryError>;
}
