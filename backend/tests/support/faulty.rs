//! Repository wrapper that fails one command inside every transaction.
//!
//! Include with `#[path = "support/faulty.rs"]` next to the harness when a
//! test needs to observe rollback.

use async_trait::async_trait;
use user_groups::domain::ports::{
    GroupCommand, GroupQuery, Repository, RepositoryError, Transaction, TransactionFuture,
    UserCommand, UserQuery, unit_of_work,
};
use user_groups::domain::{Group, GroupId, User, UserId};

/// Command that [`FaultyRepository`] fails inside every unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    UserDelete,
    GroupAddUsers,
}

/// Wraps a repository and fails one command inside its transactions.
///
/// Commands issued before the failing one still reach the inner handle, so
/// only the inner backend's rollback keeps them from being committed.
pub struct FaultyRepository<R> {
    inner: R,
    fault: Fault,
}

impl<R> FaultyRepository<R> {
    pub fn new(inner: R, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

#[async_trait]
impl<R: Repository> Repository for FaultyRepository<R> {
    fn users(&self) -> &dyn UserQuery {
        self.inner.users()
    }

    fn groups(&self) -> &dyn GroupQuery {
        self.inner.groups()
    }

    async fn run_transaction<T, F>(&self, work: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn Transaction) -> TransactionFuture<'t, T> + Send + 'static,
    {
        let fault = self.fault;
        self.inner
            .run_transaction(move |tx| {
                unit_of_work(async move {
                    let mut faulty = FaultyTransaction { inner: tx, fault };
                    let handle: &mut dyn Transaction = &mut faulty;
                    work(handle).await
                })
            })
            .await
    }
}

struct FaultyTransaction<'a> {
    inner: &'a mut dyn Transaction,
    fault: Fault,
}

impl FaultyTransaction<'_> {
    fn trip(&self, fault: Fault) -> Result<(), RepositoryError> {
        if self.fault == fault {
            return Err(RepositoryError::query(format!("injected {fault:?} failure")));
        }
        Ok(())
    }
}

impl Transaction for FaultyTransaction<'_> {
    fn users(&mut self) -> &mut dyn UserCommand {
        self
    }

    fn groups(&mut self) -> &mut dyn GroupCommand {
        self
    }
}

#[async_trait]
impl<'a> UserCommand for FaultyTransaction<'a> {
    async fn create(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.inner.users().create(user).await
    }

    async fn update(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.inner.users().update(user).await
    }

    async fn delete(&mut self, id: &UserId) -> Result<(), RepositoryError> {
        self.trip(Fault::UserDelete)?;
        self.inner.users().delete(id).await
    }
}

#[async_trait]
impl<'a> GroupCommand for FaultyTransaction<'a> {
    async fn create(&mut self, group: &Group) -> Result<(), RepositoryError> {
        self.inner.groups().create(group).await
    }

    async fn update(&mut self, group: &Group) -> Result<(), RepositoryError> {
        self.inner.groups().update(group).await
    }

    async fn delete(&mut self, id: &GroupId) -> Result<(), RepositoryError> {
        self.inner.groups().delete(id).await
    }

    async fn add_users(&mut self, id: &GroupId, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        self.trip(Fault::GroupAddUsers)?;
        self.inner.groups().add_users(id, user_ids).await
    }

    async fn remove_users(
        &mut self,
        id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        self.inner.groups().remove_users(id, user_ids).await
    }

    async fn remove_users_from_all(&mut self, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        self.inner.groups().remove_users_from_all(user_ids).await
    }
}
