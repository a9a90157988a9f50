//! PostgreSQL [`Repository`] backed by Diesel.
//!
//! A unit of work checks out one pooled connection and runs the caller's work
//! inside a database transaction on it. Every command issued through the
//! [`Transaction`] handle uses that connection, so the writes commit or roll
//! back together.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection};
use tracing::debug;

use crate::domain::ports::{
    GroupCommand, GroupQuery, Repository, RepositoryError, Transaction, TransactionFuture,
    UserCommand, UserQuery,
};
use crate::domain::{Group, GroupId, User, UserId};

use super::diesel_groups::{self, DieselGroupQuery};
use super::diesel_users::{self, DieselUserQuery};
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// Diesel-backed storage for users and groups.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    users: DieselUserQuery,
    groups: DieselGroupQuery,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: DieselUserQuery::new(pool.clone()),
            groups: DieselGroupQuery::new(pool.clone()),
            pool,
        }
    }
}

/// Failure inside a database transaction: either Diesel itself or the
/// caller's work.
#[derive(Debug)]
enum TransactionError {
    Diesel(diesel::result::Error),
    Work(RepositoryError),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<TransactionError> for RepositoryError {
    fn from(error: TransactionError) -> Self {
        match error {
            TransactionError::Diesel(error) => map_diesel_error(error),
            TransactionError::Work(error) => error,
        }
    }
}

/// Transaction handle bound to the connection running the transaction.
struct DieselTransaction<'c> {
    conn: &'c mut AsyncPgConnection,
}

impl<'c> Transaction for DieselTransaction<'c> {
    fn users(&mut self) -> &mut dyn UserCommand {
        self
    }

    fn groups(&mut self) -> &mut dyn GroupCommand {
        self
    }
}

#[async_trait]
impl<'c> UserCommand for DieselTransaction<'c> {
    async fn create(&mut self, user: &User) -> Result<(), RepositoryError> {
        diesel_users::insert_user(self.conn, user).await
    }

    async fn update(&mut self, user: &User) -> Result<(), RepositoryError> {
        diesel_users::update_user(self.conn, user).await
    }

    async fn delete(&mut self, id: &UserId) -> Result<(), RepositoryError> {
        diesel_users::delete_user(self.conn, id).await
    }
}

#[async_trait]
impl<'c> GroupCommand for DieselTransaction<'c> {
    async fn create(&mut self, group: &Group) -> Result<(), RepositoryError> {
        diesel_groups::insert_group(self.conn, group).await
    }

    async fn update(&mut self, group: &Group) -> Result<(), RepositoryError> {
        diesel_groups::rename_group(self.conn, group).await
    }

    async fn delete(&mut self, id: &GroupId) -> Result<(), RepositoryError> {
        diesel_groups::delete_group(self.conn, id).await
    }

    async fn add_users(&mut self, id: &GroupId, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        diesel_groups::add_members(self.conn, id, user_ids).await
    }

    async fn remove_users(
        &mut self,
        id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        diesel_groups::remove_members(self.conn, id, user_ids).await
    }

    async fn remove_users_from_all(&mut self, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        diesel_groups::remove_members_everywhere(self.conn, user_ids).await
    }
}

#[async_trait]
impl Repository for DieselRepository {
    fn users(&self) -> &dyn UserQuery {
        &self.users
    }

    fn groups(&self) -> &dyn GroupQuery {
        &self.groups
    }

    async fn run_transaction<T, F>(&self, work: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn Transaction) -> TransactionFuture<'t, T> + Send + 'static,
    {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let mut transaction = DieselTransaction { conn };
                    let handle: &mut dyn Transaction = &mut transaction;
                    work(handle).await.map_err(TransactionError::Work)
                }
                .scope_boxed()
            })
            .await;
        if let Err(error) = &outcome {
            debug!(?error, "transaction rolled back");
        }
        outcome.map_err(RepositoryError::from)
    }
}
