//! Group and association statements shared by the pooled query facet and
//! the transaction handle.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{GroupListFilter, GroupQuery, RepositoryError};
use crate::domain::{Group, GroupId, UserId};

use super::diesel_users::{id_strs, require_row};
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{GroupRename, GroupRow, GroupUserRow, NewGroupRow, NewGroupUserRow};
use super::pool::DbPool;
use super::schema::{group_users, groups};

fn require_ids(user_ids: &[UserId]) -> Result<(), RepositoryError> {
    if user_ids.is_empty() {
        return Err(RepositoryError::query("no user ids given"));
    }
    Ok(())
}

pub(crate) async fn find_group(
    conn: &mut AsyncPgConnection,
    id: &GroupId,
) -> Result<Option<Group>, RepositoryError> {
    let row: Option<GroupRow> = groups::table
        .find(id.as_ref())
        .select(GroupRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    let Some(row) = row else {
        return Ok(None);
    };

    let members: Vec<String> = group_users::table
        .filter(group_users::group_id.eq(id.as_ref()))
        .select(group_users::user_id)
        .order_by(group_users::position)
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    row.into_domain(members).map(Some)
}

/// Groups matching `filter`, each with its complete member list.
pub(crate) async fn list_groups(
    conn: &mut AsyncPgConnection,
    filter: &GroupListFilter,
) -> Result<Vec<Group>, RepositoryError> {
    let rows: Vec<GroupRow> = match filter.user_ids() {
        None => {
            groups::table
                .select(GroupRow::as_select())
                .order_by(groups::position)
                .load(conn)
                .await
        }
        Some([]) => return Ok(Vec::new()),
        Some(ids) => {
            let referencing = group_users::table
                .filter(group_users::user_id.eq_any(id_strs(ids)))
                .select(group_users::group_id);
            groups::table
                .filter(groups::id.eq_any(referencing))
                .select(GroupRow::as_select())
                .order_by(groups::position)
                .load(conn)
                .await
        }
    }
    .map_err(map_diesel_error)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let group_ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    let pairs: Vec<GroupUserRow> = group_users::table
        .filter(group_users::group_id.eq_any(group_ids))
        .select(GroupUserRow::as_select())
        .order_by(group_users::position)
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut members: HashMap<String, Vec<String>> = HashMap::new();
    for pair in pairs {
        members.entry(pair.group_id).or_default().push(pair.user_id);
    }
    rows.into_iter()
        .map(|row| {
            let member_ids = members.remove(&row.id).unwrap_or_default();
            row.into_domain(member_ids)
        })
        .collect()
}

pub(crate) async fn insert_group(
    conn: &mut AsyncPgConnection,
    group: &Group,
) -> Result<(), RepositoryError> {
    diesel::insert_into(groups::table)
        .values(NewGroupRow {
            id: group.id().as_ref(),
            name: group.name().as_ref(),
        })
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

pub(crate) async fn rename_group(
    conn: &mut AsyncPgConnection,
    group: &Group,
) -> Result<(), RepositoryError> {
    let changes = GroupRename {
        name: group.name().as_ref(),
        updated_at: Utc::now(),
    };
    let affected = diesel::update(groups::table.find(group.id().as_ref()))
        .set(&changes)
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    require_row(affected, || format!("group {} does not exist", group.id()))
}

pub(crate) async fn delete_group(
    conn: &mut AsyncPgConnection,
    id: &GroupId,
) -> Result<(), RepositoryError> {
    let affected = diesel::delete(groups::table.find(id.as_ref()))
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    require_row(affected, || format!("group {id} does not exist"))
}

/// Insert association rows in the given order; existing pairs are skipped.
pub(crate) async fn add_members(
    conn: &mut AsyncPgConnection,
    id: &GroupId,
    user_ids: &[UserId],
) -> Result<(), RepositoryError> {
    require_ids(user_ids)?;
    let rows: Vec<NewGroupUserRow<'_>> = user_ids
        .iter()
        .map(|user_id| NewGroupUserRow {
            group_id: id.as_ref(),
            user_id: user_id.as_ref(),
        })
        .collect();
    diesel::insert_into(group_users::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

pub(crate) async fn remove_members(
    conn: &mut AsyncPgConnection,
    id: &GroupId,
    user_ids: &[UserId],
) -> Result<(), RepositoryError> {
    require_ids(user_ids)?;
    diesel::delete(
        group_users::table
            .filter(group_users::group_id.eq(id.as_ref()))
            .filter(group_users::user_id.eq_any(id_strs(user_ids))),
    )
    .execute(conn)
    .await
    .map_err(map_diesel_error)?;
    Ok(())
}

pub(crate) async fn remove_members_everywhere(
    conn: &mut AsyncPgConnection,
    user_ids: &[UserId],
) -> Result<(), RepositoryError> {
    require_ids(user_ids)?;
    diesel::delete(group_users::table.filter(group_users::user_id.eq_any(id_strs(user_ids))))
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

/// Pooled, read-only group facet.
#[derive(Clone)]
pub struct DieselGroupQuery {
    pool: DbPool,
}

impl DieselGroupQuery {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupQuery for DieselGroupQuery {
    async fn find(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_group(&mut conn, id).await
    }

    async fn list(&self, filter: &GroupListFilter) -> Result<Vec<Group>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        list_groups(&mut conn, filter).await
    }
}
