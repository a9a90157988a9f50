//! Group use cases.
//!
//! Writes follow the same shape: validate the candidate, check cross-aggregate
//! references through the existence services, then issue every write for the
//! use case inside one unit of work. Reads resolve member ids to users with a
//! single batched query.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::existence::{
    GroupExistence, GroupExistenceService, UserExistence, UserExistenceService,
};
use super::ports::{
    CreateGroupRequest, CreateGroupResponse, DeleteGroupRequest, GetGroupRequest,
    GetGroupResponse, GetGroupsResponse, GroupListFilter, GroupOperations, GroupView, IdGenerator,
    Repository, UpdateGroupRequest, UserListFilter, unit_of_work,
};
use super::{Group, GroupName, OperationError, User, UserId};

/// Group service implementing [`GroupOperations`].
#[derive(Clone)]
pub struct GroupService<R> {
    repository: Arc<R>,
    user_existence: Arc<dyn UserExistence>,
    group_existence: Arc<dyn GroupExistence>,
    ids: Arc<dyn IdGenerator>,
}

impl<R> GroupService<R>
where
    R: Repository + 'static,
{
    /// Create a service whose existence checks read from `repository`.
    pub fn new(repository: Arc<R>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            user_existence: Arc::new(UserExistenceService::new(Arc::clone(&repository))),
            group_existence: Arc::new(GroupExistenceService::new(Arc::clone(&repository))),
            repository,
            ids,
        }
    }

    /// Create a service with explicit existence checks.
    pub fn with_existence(
        repository: Arc<R>,
        user_existence: Arc<dyn UserExistence>,
        group_existence: Arc<dyn GroupExistence>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            user_existence,
            group_existence,
            ids,
        }
    }
}

impl<R> GroupService<R>
where
    R: Repository,
{
    /// Resolve `member_ids` to users, keeping their order.
    async fn resolve_members(&self, member_ids: &[UserId]) -> Result<Vec<User>, OperationError> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self
            .repository
            .users()
            .list(&UserListFilter::by_user_ids(member_ids))
            .await?;
        Ok(order_members(member_ids, &index_users(&users)))
    }
}

fn index_users(users: &[User]) -> HashMap<&UserId, &User> {
    users.iter().map(|user| (user.id(), user)).collect()
}

/// Users for `member_ids` in that order; ids without a stored user are
/// dropped.
fn order_members(member_ids: &[UserId], lookup: &HashMap<&UserId, &User>) -> Vec<User> {
    member_ids
        .iter()
        .filter_map(|id| lookup.get(id).map(|user| (*user).clone()))
        .collect()
}

/// Distinct member ids across `groups`, in first-seen order.
fn member_union(groups: &[Group]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(Group::member_ids)
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

#[async_trait]
impl<R> GroupOperations for GroupService<R>
where
    R: Repository,
{
    async fn create_group(
        &self,
        request: CreateGroupRequest,
    ) -> Result<CreateGroupResponse, OperationError> {
        let CreateGroupRequest { name, user_ids } = request;
        let group = Group::try_from_strings(self.ids.group_id(), name, user_ids)?;

        if group.has_members() && !self.user_existence.exists_all(group.member_ids()).await? {
            return Err(OperationError::InvalidUserIds);
        }

        let stored = group.clone();
        self.repository
            .run_transaction(move |tx| {
                unit_of_work(async move {
                    tx.groups().create(&stored).await?;
                    if stored.has_members() {
                        tx.groups()
                            .add_users(stored.id(), stored.member_ids())
                            .await
                    } else {
                        Ok(())
                    }
                })
            })
            .await?;

        let users = self.resolve_members(group.member_ids()).await?;
        Ok(CreateGroupResponse {
            group: GroupView::new(&group, users),
        })
    }

    async fn get_group(
        &self,
        request: GetGroupRequest,
    ) -> Result<GetGroupResponse, OperationError> {
        let Some(group) = self.repository.groups().find(&request.group_id).await? else {
            warn!(group_id = %request.group_id, "group not found");
            return Err(OperationError::GroupNotFound);
        };

        let users = self.resolve_members(group.member_ids()).await?;
        Ok(GetGroupResponse {
            group: GroupView::new(&group, users),
        })
    }

    async fn get_groups(&self) -> Result<GetGroupsResponse, OperationError> {
        let groups = self.repository.groups().list(&GroupListFilter::all()).await?;
        if groups.is_empty() {
            return Ok(GetGroupsResponse { groups: Vec::new() });
        }

        let union = member_union(&groups);
        if union.is_empty() {
            let groups = groups
                .iter()
                .map(|group| GroupView::new(group, Vec::new()))
                .collect();
            return Ok(GetGroupsResponse { groups });
        }

        debug!(groups = groups.len(), members = union.len(), "resolving group members");
        let users = self
            .repository
            .users()
            .list(&UserListFilter::by_user_ids(union))
            .await?;
        let lookup = index_users(&users);
        let groups = groups
            .iter()
            .map(|group| GroupView::new(group, order_members(group.member_ids(), &lookup)))
            .collect();
        Ok(GetGroupsResponse { groups })
    }

    async fn update_group(&self, request: UpdateGroupRequest) -> Result<(), OperationError> {
        let candidate = Group::with_name(request.group_id, GroupName::new(request.name)?);

        if !self.group_existence.exists(candidate.id()).await? {
            return Err(OperationError::GroupNotFound);
        }

        self.repository
            .run_transaction(move |tx| {
                unit_of_work(async move { tx.groups().update(&candidate).await })
            })
            .await?;
        Ok(())
    }

    async fn delete_group(&self, request: DeleteGroupRequest) -> Result<(), OperationError> {
        let Some(group) = self.repository.groups().find(&request.group_id).await? else {
            return Err(OperationError::GroupNotFound);
        };

        self.repository
            .run_transaction(move |tx| {
                unit_of_work(async move {
                    // Associations go first so backends with constraints accept the row delete.
                    if group.has_members() {
                        tx.groups()
                            .remove_users(group.id(), group.member_ids())
                            .await?;
                    }
                    tx.groups().delete(group.id()).await
                })
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "group_service_tests.rs"]
mod tests;
