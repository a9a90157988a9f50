//! User use cases.
//!
//! Deleting a user is the one write that spans both aggregates: the user is
//! stripped from every group and then removed, inside a single unit of work,
//! so no group is ever left pointing at a deleted user.

use std::slice;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::existence::{
    GroupExistence, GroupExistenceService, UserExistence, UserExistenceService,
};
use super::ports::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, GetUserRequest, GetUserResponse,
    GetUsersResponse, IdGenerator, Repository, UpdateUserRequest, UserListFilter, UserOperations,
    unit_of_work,
};
use super::{Email, OperationError, User, UserName};

/// User service implementing [`UserOperations`].
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
    user_existence: Arc<dyn UserExistence>,
    group_existence: Arc<dyn GroupExistence>,
    ids: Arc<dyn IdGenerator>,
}

impl<R> UserService<R>
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

#[async_trait]
impl<R> UserOperations for UserService<R>
where
    R: Repository,
{
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserResponse, OperationError> {
        let user = User::new(
            self.ids.user_id(),
            UserName::new(request.name)?,
            Email::new(request.email)?,
        );

        let stored = user.clone();
        self.repository
            .run_transaction(move |tx| unit_of_work(async move { tx.users().create(&stored).await }))
            .await?;

        Ok(CreateUserResponse { user })
    }

    async fn get_user(&self, request: GetUserRequest) -> Result<GetUserResponse, OperationError> {
        let Some(user) = self.repository.users().find(&request.user_id).await? else {
            warn!(user_id = %request.user_id, "user not found");
            return Err(OperationError::UserNotFound);
        };
        Ok(GetUserResponse { user })
    }

    async fn get_users(&self) -> Result<GetUsersResponse, OperationError> {
        let users = self.repository.users().list(&UserListFilter::all()).await?;
        Ok(GetUsersResponse { users })
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<(), OperationError> {
        let user = User::new(
            request.user_id,
            UserName::new(request.name)?,
            Email::new(request.email)?,
        );

        if !self.user_existence.exists(user.id()).await? {
            return Err(OperationError::UserNotFound);
        }

        self.repository
            .run_transaction(move |tx| unit_of_work(async move { tx.users().update(&user).await }))
            .await?;
        Ok(())
    }

    async fn delete_user(&self, request: DeleteUserRequest) -> Result<(), OperationError> {
        let user_id = request.user_id;
        if !self.user_existence.exists(&user_id).await? {
            return Err(OperationError::UserNotFound);
        }

        let referenced = self
            .group_existence
            .has_users_any(slice::from_ref(&user_id))
            .await?;
        if referenced {
            debug!(user_id = %user_id, "removing user from groups before delete");
        }

        self.repository
            .run_transaction(move |tx| {
                unit_of_work(async move {
                    if referenced {
                        tx.groups()
                            .remove_users_from_all(slice::from_ref(&user_id))
                            .await?;
                    }
                    tx.users().delete(&user_id).await
                })
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
