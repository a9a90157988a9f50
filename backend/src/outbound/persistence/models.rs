//! Diesel row structs. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::RepositoryError;
use crate::domain::{Group, User};

use super::schema::{group_users, groups, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserRow {
    /// Rebuild the domain user, treating invalid stored data as a query
    /// failure.
    pub(crate) fn into_domain(self) -> Result<User, RepositoryError> {
        let id = self.id.clone();
        User::try_from_strings(self.id, self.name, self.email)
            .map_err(|err| RepositoryError::query(format!("stored user {id} is invalid: {err}")))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().as_ref(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: String,
    pub name: String,
}

impl GroupRow {
    pub(crate) fn into_domain(self, member_ids: Vec<String>) -> Result<Group, RepositoryError> {
        let id = self.id.clone();
        Group::try_from_strings(self.id, self.name, member_ids)
            .map_err(|err| RepositoryError::query(format!("stored group {id} is invalid: {err}")))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = groups)]
pub(crate) struct NewGroupRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = groups)]
pub(crate) struct GroupRename<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = group_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupUserRow {
    pub group_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = group_users)]
pub(crate) struct NewGroupUserRow<'a> {
    pub group_id: &'a str,
    pub user_id: &'a str,
}
