//! Table-shaped state shared by the in-memory query facets and transactions.

use std::collections::HashMap;

use crate::domain::ports::{GroupListFilter, RepositoryError, UserListFilter};
use crate::domain::{Group, GroupId, GroupName, User, UserId};

#[derive(Debug, Clone)]
struct GroupRow {
    id: GroupId,
    name: GroupName,
}

#[derive(Debug, Clone)]
struct Membership {
    group_id: GroupId,
    user_id: UserId,
}

/// Users, group rows and association rows, each kept in insertion order.
#[derive(Debug, Clone, Default)]
pub(super) struct StoreState {
    users: Vec<User>,
    groups: Vec<GroupRow>,
    memberships: Vec<Membership>,
}

fn require_ids(user_ids: &[UserId]) -> Result<(), RepositoryError> {
    if user_ids.is_empty() {
        return Err(RepositoryError::query("no user ids given"));
    }
    Ok(())
}

impl StoreState {
    pub(super) fn find_user(&self, id: &UserId) -> Option<User> {
        self.users.iter().find(|user| user.id() == id).cloned()
    }

    pub(super) fn list_users(&self, filter: &UserListFilter) -> Vec<User> {
        match filter.user_ids() {
            None => self.users.clone(),
            Some(ids) => self
                .users
                .iter()
                .filter(|user| ids.contains(user.id()))
                .cloned()
                .collect(),
        }
    }

    fn members_of(&self, group_id: &GroupId) -> Vec<UserId> {
        self.memberships
            .iter()
            .filter(|membership| &membership.group_id == group_id)
            .map(|membership| membership.user_id.clone())
            .collect()
    }

    fn assemble(&self, row: &GroupRow, members: Vec<UserId>) -> Result<Group, RepositoryError> {
        Group::new(row.id.clone(), row.name.clone(), members)
            .map_err(|err| RepositoryError::query(format!("stored group {} is invalid: {err}", row.id)))
    }

    pub(super) fn find_group(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        self.groups
            .iter()
            .find(|row| &row.id == id)
            .map(|row| self.assemble(row, self.members_of(&row.id)))
            .transpose()
    }

    pub(super) fn list_groups(&self, filter: &GroupListFilter) -> Result<Vec<Group>, RepositoryError> {
        let mut members: HashMap<&GroupId, Vec<UserId>> = HashMap::new();
        for membership in &self.memberships {
            members
                .entry(&membership.group_id)
                .or_default()
                .push(membership.user_id.clone());
        }

        self.groups
            .iter()
            .filter(|row| match filter.user_ids() {
                None => true,
                Some(ids) => members
                    .get(&row.id)
                    .is_some_and(|group_members| group_members.iter().any(|id| ids.contains(id))),
            })
            .map(|row| self.assemble(row, members.get(&row.id).cloned().unwrap_or_default()))
            .collect()
    }

    pub(super) fn insert_user(&mut self, user: &User) -> Result<(), RepositoryError> {
        if self.users.iter().any(|stored| stored.id() == user.id()) {
            return Err(RepositoryError::query(format!("user {} already exists", user.id())));
        }
        self.users.push(user.clone());
        Ok(())
    }

    pub(super) fn replace_user(&mut self, user: &User) -> Result<(), RepositoryError> {
        let stored = self
            .users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .ok_or_else(|| RepositoryError::query(format!("user {} does not exist", user.id())))?;
        *stored = user.clone();
        Ok(())
    }

    pub(super) fn remove_user(&mut self, id: &UserId) -> Result<(), RepositoryError> {
        let before = self.users.len();
        self.users.retain(|user| user.id() != id);
        if self.users.len() == before {
            return Err(RepositoryError::query(format!("user {id} does not exist")));
        }
        Ok(())
    }

    pub(super) fn insert_group(&mut self, group: &Group) -> Result<(), RepositoryError> {
        if self.groups.iter().any(|row| &row.id == group.id()) {
            return Err(RepositoryError::query(format!(
                "group {} already exists",
                group.id()
            )));
        }
        self.groups.push(GroupRow {
            id: group.id().clone(),
            name: group.name().clone(),
        });
        Ok(())
    }

    pub(super) fn rename_group(&mut self, group: &Group) -> Result<(), RepositoryError> {
        let row = self
            .groups
            .iter_mut()
            .find(|row| &row.id == group.id())
            .ok_or_else(|| RepositoryError::query(format!("group {} does not exist", group.id())))?;
        row.name = group.name().clone();
        Ok(())
    }

    pub(super) fn remove_group(&mut self, id: &GroupId) -> Result<(), RepositoryError> {
        let before = self.groups.len();
        self.groups.retain(|row| &row.id != id);
        if self.groups.len() == before {
            return Err(RepositoryError::query(format!("group {id} does not exist")));
        }
        Ok(())
    }

    pub(super) fn add_memberships(
        &mut self,
        group_id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        require_ids(user_ids)?;
        for user_id in user_ids {
            let present = self
                .memberships
                .iter()
                .any(|membership| &membership.group_id == group_id && &membership.user_id == user_id);
            if !present {
                self.memberships.push(Membership {
                    group_id: group_id.clone(),
                    user_id: user_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub(super) fn remove_memberships(
        &mut self,
        group_id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        require_ids(user_ids)?;
        self.memberships.retain(|membership| {
            &membership.group_id != group_id || !user_ids.contains(&membership.user_id)
        });
        Ok(())
    }

    pub(super) fn remove_memberships_everywhere(
        &mut self,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        require_ids(user_ids)?;
        self.memberships
            .retain(|membership| !user_ids.contains(&membership.user_id));
        Ok(())
    }
}
