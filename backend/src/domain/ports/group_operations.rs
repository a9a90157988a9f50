//! Driving port for group use cases.
//!
//! Responses carry full member [`User`] records rather than bare ids; the
//! service assembles them from a batched user query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Group, GroupId, GroupName, OperationError, User};

/// A group together with its resolved members.
///
/// `users` follows the group's own member order. Member ids without a stored
/// user are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: GroupName,
    pub users: Vec<User>,
}

impl GroupView {
    /// Pair a group with already resolved members.
    pub fn new(group: &Group, users: Vec<User>) -> Self {
        Self {
            id: group.id().clone(),
            name: group.name().clone(),
            users,
        }
    }
}

/// Request to create a group with an optional initial member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    pub group: GroupView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupRequest {
    pub group_id: GroupId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGroupResponse {
    pub group: GroupView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGroupsResponse {
    pub groups: Vec<GroupView>,
}

/// Rename a group. Membership is not touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub group_id: GroupId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    pub group_id: GroupId,
}

/// Group use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupOperations: Send + Sync {
    /// Create a group after checking every requested member exists.
    async fn create_group(
        &self,
        request: CreateGroupRequest,
    ) -> Result<CreateGroupResponse, OperationError>;

    async fn get_group(&self, request: GetGroupRequest)
    -> Result<GetGroupResponse, OperationError>;

    /// List every group with its members, using one user query in total.
    async fn get_groups(&self) -> Result<GetGroupsResponse, OperationError>;

    async fn update_group(&self, request: UpdateGroupRequest) -> Result<(), OperationError>;

    /// Delete a group and its association rows.
    async fn delete_group(&self, request: DeleteGroupRequest) -> Result<(), OperationError>;
}
