//! Diesel table definitions. Keep in step with `backend/migrations`.
//!
//! Every table carries a `position` sequence column. Reads order by it so
//! "creation order" survives rows written in the same transaction, where
//! `created_at` ties.

diesel::table! {
    users (id) {
        id -> Text,
        position -> Int8,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    groups (id) {
        id -> Text,
        position -> Int8,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (group, member) pair. No foreign keys: reference checks
    /// live in the domain, and reads drop ids with no matching user.
    group_users (group_id, user_id) {
        group_id -> Text,
        user_id -> Text,
        position -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, groups, group_users);
