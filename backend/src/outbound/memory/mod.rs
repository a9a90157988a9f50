//! In-memory storage backend.
//!
//! All state lives in an explicit [`MemoryStore`] handle that is passed to
//! [`MemoryRepository::new`]; clones of the handle share the same tables.
//! Transactions run against a private copy of the tables that replaces the
//! shared state only when the work succeeds, so a failed unit of work leaves
//! nothing behind. The store lock is held for the whole unit of work, which
//! serialises writers but not the existence checks that precede them.

mod state;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    GroupCommand, GroupListFilter, GroupQuery, Repository, RepositoryError, Transaction,
    TransactionFuture, UserCommand, UserListFilter, UserQuery,
};
use crate::domain::{Group, GroupId, User, UserId};

use self::state::StoreState;

/// Shared handle to the in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// User query facet over a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryUserQuery {
    store: MemoryStore,
}

#[async_trait]
impl UserQuery for MemoryUserQuery {
    async fn find(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.state.lock().await.find_user(id))
    }

    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.state.lock().await.list_users(filter))
    }
}

/// Group query facet over a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryGroupQuery {
    store: MemoryStore,
}

#[async_trait]
impl GroupQuery for MemoryGroupQuery {
    async fn find(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        self.store.state.lock().await.find_group(id)
    }

    async fn list(&self, filter: &GroupListFilter) -> Result<Vec<Group>, RepositoryError> {
        self.store.state.lock().await.list_groups(filter)
    }
}

/// [`Repository`] over a [`MemoryStore`].
///
/// # Examples
/// ```
/// use user_groups::outbound::memory::{MemoryRepository, MemoryStore};
///
/// let store = MemoryStore::new();
/// let repository = MemoryRepository::new(store.clone());
/// # let _ = repository;
/// ```
#[derive(Clone)]
pub struct MemoryRepository {
    store: MemoryStore,
    users: MemoryUserQuery,
    groups: MemoryGroupQuery,
}

impl MemoryRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            users: MemoryUserQuery {
                store: store.clone(),
            },
            groups: MemoryGroupQuery {
                store: store.clone(),
            },
            store,
        }
    }
}

#[async_trait]
impl Repository for MemoryRepository {
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
        let mut committed = self.store.state.lock().await;
        let mut transaction = MemoryTransaction {
            state: committed.clone(),
        };
        let handle: &mut dyn Transaction = &mut transaction;
        let output = work(handle).await?;
        *committed = transaction.state;
        Ok(output)
    }
}

/// Working copy of the tables for one unit of work.
struct MemoryTransaction {
    state: StoreState,
}

impl Transaction for MemoryTransaction {
    fn users(&mut self) -> &mut dyn UserCommand {
        self
    }

    fn groups(&mut self) -> &mut dyn GroupCommand {
        self
    }
}

#[async_trait]
impl UserCommand for MemoryTransaction {
    async fn create(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.state.insert_user(user)
    }

    async fn update(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.state.replace_user(user)
    }

    async fn delete(&mut self, id: &UserId) -> Result<(), RepositoryError> {
        self.state.remove_user(id)
    }
}

#[async_trait]
impl GroupCommand for MemoryTransaction {
    async fn create(&mut self, group: &Group) -> Result<(), RepositoryError> {
        self.state.insert_group(group)
    }

    async fn update(&mut self, group: &Group) -> Result<(), RepositoryError> {
        self.state.rename_group(group)
    }

    async fn delete(&mut self, id: &GroupId) -> Result<(), RepositoryError> {
        self.state.remove_group(id)
    }

    async fn add_users(&mut self, id: &GroupId, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        self.state.add_memberships(id, user_ids)
    }

    async fn remove_users(
        &mut self,
        id: &GroupId,
        user_ids: &[UserId],
    ) -> Result<(), RepositoryError> {
        self.state.remove_memberships(id, user_ids)
    }

    async fn remove_users_from_all(&mut self, user_ids: &[UserId]) -> Result<(), RepositoryError> {
        self.state.remove_memberships_everywhere(user_ids)
    }
}
