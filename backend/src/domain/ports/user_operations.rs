//! Driving port for user use cases.
//!
//! Inbound adapters call these operations with plain request structs and
//! receive either a response struct or an [`OperationError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{OperationError, User, UserId};

/// Request to create a user. The id is assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUsersResponse {
    pub users: Vec<User>,
}

/// Full replacement of a user's name and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    pub user_id: UserId,
}

/// User use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserOperations: Send + Sync {
    /// Validate and store a new user under a generated id.
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, OperationError>;

    async fn get_user(&self, request: GetUserRequest) -> Result<GetUserResponse, OperationError>;

    /// List every user in creation order.
    async fn get_users(&self) -> Result<GetUsersResponse, OperationError>;

    async fn update_user(&self, request: UpdateUserRequest) -> Result<(), OperationError>;

    /// Delete a user and strip it from every group in the same unit of work.
    async fn delete_user(&self, request: DeleteUserRequest) -> Result<(), OperationError>;
}
