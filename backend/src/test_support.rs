//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::domain::ports::{IdGenerator, Repository, RepositoryError, unit_of_work};
use crate::domain::{Group, GroupId, User, UserId};
use crate::outbound::memory::{MemoryRepository, MemoryStore};

/// User `id` named "name {id}" with a matching email.
pub(crate) fn user(id: &str) -> User {
    User::try_from_strings(id, format!("name {id}"), format!("{id}@example.com"))
        .expect("fixture user is valid")
}

pub(crate) fn user_ids(ids: &[&str]) -> Vec<UserId> {
    ids.iter()
        .map(|id| UserId::new(*id).expect("fixture user id is valid"))
        .collect()
}

pub(crate) fn group_id(id: &str) -> GroupId {
    GroupId::new(id).expect("fixture group id is valid")
}

pub(crate) fn member_strings(group: &Group) -> Vec<String> {
    group
        .member_ids()
        .iter()
        .map(|id| id.as_ref().to_owned())
        .collect()
}

/// Write users and groups (with members) in one unit of work.
pub(crate) async fn seed(
    repository: &MemoryRepository,
    users: &[&str],
    groups: &[(&str, &[&str])],
) {
    let users: Vec<User> = users.iter().map(|id| user(id)).collect();
    let groups: Vec<Group> = groups
        .iter()
        .map(|(id, members)| {
            Group::try_from_strings(*id, format!("group {id}"), members.iter().copied())
                .expect("fixture group is valid")
        })
        .collect();
    repository
        .run_transaction(move |tx| {
            unit_of_work(async move {
                for user in &users {
                    tx.users().create(user).await?;
                }
                for group in &groups {
                    tx.groups().create(group).await?;
                    if group.has_members() {
                        tx.groups().add_users(group.id(), group.member_ids()).await?;
                    }
                }
                Ok::<(), RepositoryError>(())
            })
        })
        .await
        .expect("seeding succeeds");
}

/// Fresh repository holding the given users and groups.
pub(crate) async fn seeded_repository(
    users: &[&str],
    groups: &[(&str, &[&str])],
) -> Arc<MemoryRepository> {
    let repository = MemoryRepository::new(MemoryStore::new());
    seed(&repository, users, groups).await;
    Arc::new(repository)
}

/// Hands out the same ids every time.
#[derive(Debug, Clone)]
pub(crate) struct FixedIds {
    pub user: &'static str,
    pub group: &'static str,
}

impl Default for FixedIds {
    fn default() -> Self {
        Self {
            user: "u-new",
            group: "g-new",
        }
    }
}

impl IdGenerator for FixedIds {
    fn user_id(&self) -> UserId {
        UserId::new(self.user).expect("fixture user id is valid")
    }

    fn group_id(&self) -> GroupId {
        GroupId::new(self.group).expect("fixture group id is valid")
    }
}
