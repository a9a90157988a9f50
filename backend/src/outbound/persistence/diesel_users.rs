//! User statements shared by the pooled query facet and the transaction
//! handle.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RepositoryError, UserListFilter, UserQuery};
use crate::domain::{User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

pub(crate) fn id_strs<I>(ids: &[I]) -> Vec<&str>
where
    I: AsRef<str>,
{
    ids.iter().map(AsRef::as_ref).collect()
}

pub(crate) async fn find_user(
    conn: &mut AsyncPgConnection,
    id: &UserId,
) -> Result<Option<User>, RepositoryError> {
    let row: Option<UserRow> = users::table
        .find(id.as_ref())
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    row.map(UserRow::into_domain).transpose()
}

pub(crate) async fn list_users(
    conn: &mut AsyncPgConnection,
    filter: &UserListFilter,
) -> Result<Vec<User>, RepositoryError> {
    let rows: Vec<UserRow> = match filter.user_ids() {
        None => {
            users::table
                .select(UserRow::as_select())
                .order_by(users::position)
                .load(conn)
                .await
        }
        Some([]) => return Ok(Vec::new()),
        Some(ids) => {
            users::table
                .filter(users::id.eq_any(id_strs(ids)))
                .select(UserRow::as_select())
                .order_by(users::position)
                .load(conn)
                .await
        }
    }
    .map_err(map_diesel_error)?;
    rows.into_iter().map(UserRow::into_domain).collect()
}

pub(crate) async fn insert_user(
    conn: &mut AsyncPgConnection,
    user: &User,
) -> Result<(), RepositoryError> {
    diesel::insert_into(users::table)
        .values(NewUserRow::from(user))
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

pub(crate) async fn update_user(
    conn: &mut AsyncPgConnection,
    user: &User,
) -> Result<(), RepositoryError> {
    let changes = UserUpdate {
        name: user.name().as_ref(),
        email: user.email().as_ref(),
        updated_at: Utc::now(),
    };
    let affected = diesel::update(users::table.find(user.id().as_ref()))
        .set(&changes)
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    require_row(affected, || format!("user {} does not exist", user.id()))
}

pub(crate) async fn delete_user(
    conn: &mut AsyncPgConnection,
    id: &UserId,
) -> Result<(), RepositoryError> {
    let affected = diesel::delete(users::table.find(id.as_ref()))
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    require_row(affected, || format!("user {id} does not exist"))
}

/// Updates and deletes must touch exactly the addressed row.
pub(crate) fn require_row(
    affected: usize,
    message: impl FnOnce() -> String,
) -> Result<(), RepositoryError> {
    if affected == 0 {
        return Err(RepositoryError::query(message()));
    }
    Ok(())
}

/// Pooled, read-only user facet.
#[derive(Clone)]
pub struct DieselUserQuery {
    pool: DbPool,
}

impl DieselUserQuery {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserQuery for DieselUserQuery {
    async fn find(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_user(&mut conn, id).await
    }

    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        list_users(&mut conn, filter).await
    }
}
